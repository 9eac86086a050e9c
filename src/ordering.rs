//! Stable subject ranking so curriculum-standard subjects list first.

/// Priority keywords in display order, with the historical naming pairs
/// (國語/國文, 健體/健康, 英語/英文) kept adjacent.
const SUBJECT_PRIORITY: [&str; 12] = [
    "國語",
    "國文",
    "數學",
    "生活",
    "社會",
    "自然",
    "藝術",
    "健體",
    "健康",
    "綜合",
    "英語",
    "英文",
];

/// Weight of a subject name: the index of the first priority keyword it
/// contains, or a sentinel larger than the list for everything else.
#[must_use]
pub fn subject_weight(name: &str) -> usize {
    SUBJECT_PRIORITY
        .iter()
        .position(|keyword| name.contains(keyword))
        .unwrap_or(usize::MAX)
}

/// Sorts subjects by (weight, name); names sharing a weight fall back to
/// lexicographic order, so the result is stable across calls.
pub fn sort_subjects(subjects: &mut [String]) {
    subjects.sort_by(|a, b| {
        subject_weight(a)
            .cmp(&subject_weight(b))
            .then_with(|| a.cmp(b))
    });
}

use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillOverlap {
    /// `|matched| / max(1, |required|)`, or 1.0 when nothing is required.
    pub ratio: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub required_count: usize,
}

/// Overlap between a student's normalized skills and a listing's normalized
/// requirements. An empty requirement set has nothing to fail and scores 1.0;
/// an empty student skill set scores 0.0 against any requirement.
pub fn skill_overlap(required: &BTreeSet<String>, possessed: &BTreeSet<String>) -> SkillOverlap {
    if required.is_empty() {
        return SkillOverlap {
            ratio: 1.0,
            matched: vec![],
            missing: vec![],
            required_count: 0,
        };
    }

    let matched: Vec<String> = required.intersection(possessed).cloned().collect();
    let missing: Vec<String> = required.difference(possessed).cloned().collect();
    let ratio = matched.len() as f64 / required.len().max(1) as f64;

    SkillOverlap {
        ratio,
        matched,
        missing,
        required_count: required.len(),
    }
}

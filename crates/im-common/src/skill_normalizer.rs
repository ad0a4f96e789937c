use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use strsim::damerau_levenshtein;

use crate::normalize::normalize_token;

/// Alias → canonical skill token.
///
/// Students and companies type skills into free-form inputs, so the table
/// covers the spellings that show up most in internship postings.
static ALIAS_TO_CANONICAL: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let aliases: &[(&str, &[&str])] = &[
        (
            "javascript",
            &["js", "javascript", "java script", "ecmascript", "es6", "vanilla js"],
        ),
        ("typescript", &["ts", "typescript", "type script"]),
        ("nodejs", &["node", "node.js", "node js", "nodejs"]),
        ("react", &["react", "reactjs", "react.js", "react js"]),
        ("react native", &["react native", "react-native", "reactnative"]),
        ("angular", &["angular", "angularjs", "angular.js"]),
        ("vue", &["vue", "vuejs", "vue.js"]),
        ("nextjs", &["next", "next.js", "nextjs", "next js"]),
        ("express", &["express", "expressjs", "express.js"]),
        ("html", &["html", "html5"]),
        ("css", &["css", "css3"]),
        ("tailwind", &["tailwind", "tailwindcss", "tailwind css"]),
        ("python", &["python", "py", "python3", "python 3"]),
        ("django", &["django", "django rest framework", "drf"]),
        ("flask", &["flask"]),
        ("java", &["java", "core java", "java se"]),
        ("spring", &["spring", "spring boot", "springboot"]),
        ("cpp", &["c++", "cpp", "cplusplus"]),
        ("csharp", &["c#", "csharp", "c sharp"]),
        ("golang", &["go", "golang"]),
        ("kotlin", &["kotlin"]),
        ("flutter", &["flutter"]),
        ("dart", &["dart"]),
        ("sql", &["sql", "structured query language"]),
        ("postgresql", &["postgresql", "postgres", "psql"]),
        ("mysql", &["mysql", "my sql"]),
        ("mongodb", &["mongodb", "mongo", "mongo db"]),
        ("firebase", &["firebase", "google firebase"]),
        ("supabase", &["supabase"]),
        ("aws", &["aws", "amazon web services"]),
        ("gcp", &["gcp", "google cloud", "google cloud platform"]),
        ("azure", &["azure", "microsoft azure"]),
        ("docker", &["docker", "containers"]),
        ("kubernetes", &["kubernetes", "k8s"]),
        ("git", &["git", "github", "gitlab"]),
        ("machine learning", &["machine learning", "ml"]),
        ("deep learning", &["deep learning", "dl"]),
        ("artificial intelligence", &["artificial intelligence", "ai"]),
        ("data analysis", &["data analysis", "data analytics"]),
        ("pandas", &["pandas"]),
        ("numpy", &["numpy"]),
        ("tensorflow", &["tensorflow", "tf"]),
        ("pytorch", &["pytorch", "torch"]),
        ("excel", &["excel", "ms excel", "microsoft excel"]),
        ("power bi", &["power bi", "powerbi"]),
        ("figma", &["figma"]),
        ("ui/ux", &["ui/ux", "ui ux", "ux/ui", "ui/ux design"]),
        ("digital marketing", &["digital marketing", "online marketing"]),
        ("seo", &["seo", "search engine optimization"]),
        ("content writing", &["content writing", "copywriting"]),
    ];

    let mut map = HashMap::new();
    for (canonical, variants) in aliases {
        for variant in *variants {
            map.insert(*variant, *canonical);
        }
    }
    map
});

/// Alias table keyed without separators, so `react-js` and `React JS` hit the
/// same entry.
static COMPACT_ALIAS_TO_CANONICAL: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (alias, canonical) in ALIAS_TO_CANONICAL.iter() {
        map.entry(compact_key(alias)).or_insert(*canonical);
    }
    map
});

/// Minimum compact length for typo repair.
const MIN_FUZZY_LEN: usize = 7;

/// Real technologies within a typo of a table alias. They keep their own name.
const DISTINCT_TECHNOLOGIES: &[&str] = &[
    "mssql", "nestjs", "nuxtjs", "flash", "mango", "preact", "pyspark", "mariadb", "javafx",
];

/// Typos rarely touch both ends of a word; different technologies often do.
fn same_ends(a: &str, b: &str) -> bool {
    a.chars().next() == b.chars().next() && a.chars().last() == b.chars().last()
}

fn compact_key(token: &str) -> String {
    token
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-' | '_'))
        .collect()
}

fn match_canonical_token(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }

    if let Some(canonical) = ALIAS_TO_CANONICAL.get(token) {
        return Some(canonical.to_string());
    }

    let compact = compact_key(token);
    if let Some(canonical) = COMPACT_ALIAS_TO_CANONICAL.get(&compact) {
        return Some((*canonical).to_string());
    }

    fuzzy_match_canonical(&compact)
}

fn fuzzy_match_canonical(compact: &str) -> Option<String> {
    // Short tokens (go, ml, ai, java, mssql) are only matched exactly.
    if compact.chars().count() < MIN_FUZZY_LEN || DISTINCT_TECHNOLOGIES.contains(&compact) {
        return None;
    }

    let mut best: Option<(&str, usize)> = None;
    for (alias, canonical) in COMPACT_ALIAS_TO_CANONICAL.iter() {
        if alias.chars().count() < MIN_FUZZY_LEN || !same_ends(compact, alias) {
            continue;
        }

        let distance = damerau_levenshtein(compact, alias);
        let len = compact.len().max(alias.len());
        let acceptable = distance == 1 || (len >= 8 && distance == 2);
        if !acceptable {
            continue;
        }

        // Ties broken by canonical name so the result does not depend on map order.
        match best {
            Some((best_canonical, best_dist))
                if distance > best_dist || (distance == best_dist && *canonical >= best_canonical) => {}
            _ => best = Some((*canonical, distance)),
        }
    }

    best.map(|(canonical, _)| canonical.to_string())
}

/// Maps one skill to its canonical token. Unknown skills pass through
/// lowercased and whitespace-folded.
pub fn normalize_skill(skill: &str) -> String {
    let normalized = normalize_token(skill);
    match_canonical_token(&normalized).unwrap_or(normalized)
}

/// Normalized, deduplicated skill set.
///
/// Entries such as `"Python, SQL"` or `"HTML / CSS"` are split into separate
/// skills, except where the whole entry is itself a known alias (`ui/ux`).
pub fn normalize_skill_set(skills: &[String]) -> BTreeSet<String> {
    let mut set = BTreeSet::new();
    for raw in skills {
        let whole = normalize_token(raw);
        if whole.is_empty() {
            continue;
        }
        if ALIAS_TO_CANONICAL.contains_key(whole.as_str()) {
            set.insert(normalize_skill(&whole));
            continue;
        }
        for segment in whole.split([',', ';', '|', '/']) {
            let segment = segment.trim();
            if !segment.is_empty() {
                set.insert(normalize_skill(segment));
            }
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn case_and_alias_equivalence() {
        assert_eq!(normalize_skill("JavaScript"), "javascript");
        assert_eq!(normalize_skill("JS"), "javascript");
        assert_eq!(normalize_skill("K8s"), "kubernetes");
        assert_eq!(normalize_skill("C#"), "csharp");
        assert_eq!(normalize_skill("React-JS"), "react");
    }

    #[test]
    fn tolerates_small_typos_for_long_aliases() {
        assert_eq!(normalize_skill("javascirpt"), "javascript");
        assert_eq!(normalize_skill("kuberntes"), "kubernetes");
    }

    #[test]
    fn repairs_typos_of_long_aliases() {
        assert_eq!(normalize_skill("postgress"), "postgresql");
        assert_eq!(normalize_skill("tensorflw"), "tensorflow");
    }

    #[test]
    fn distinct_technologies_do_not_merge() {
        assert_eq!(normalize_skill("MSSQL"), "mssql");
        assert_eq!(normalize_skill("NestJS"), "nestjs");
        assert_eq!(normalize_skill("Flash"), "flash");
        assert_eq!(normalize_skill("Mango"), "mango");

        let profile = normalize_skill_set(&set(&["NestJS", "MSSQL"]));
        let listing = normalize_skill_set(&set(&["Next.js", "MySQL"]));
        assert!(profile.is_disjoint(&listing), "{profile:?} vs {listing:?}");
    }

    #[test]
    fn does_not_fuzz_short_tokens() {
        assert_eq!(normalize_skill("javaa"), "javaa");
        assert_eq!(normalize_skill("sq"), "sq");
    }

    #[test]
    fn unknown_skill_lowercases() {
        assert_eq!(normalize_skill("  Embedded   C "), "embedded c");
    }

    #[test]
    fn set_dedupes_and_splits_compound_entries() {
        let skills = normalize_skill_set(&set(&["Python, SQL", "python3", "HTML / CSS", " ", "UI/UX"]));

        let expected: BTreeSet<String> = ["css", "html", "python", "sql", "ui/ux"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(skills, expected);
    }

    #[test]
    fn normalization_is_symmetric_between_profile_and_listing() {
        let listing = normalize_skill_set(&set(&["React.js", "Node"]));
        let profile = normalize_skill_set(&set(&["react", "nodejs"]));
        assert_eq!(listing, profile);
    }
}

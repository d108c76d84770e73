use crate::knowledge::PageContent;


const SUBJECT_KEYWORDS: &[(&str, f64)] = &[
    ("history", 20.0),
    ("science", 20.0),
    ("mathematics", 20.0),
    ("physics", 18.0),
    ("biology", 18.0),
    ("technology", 18.0),
    ("philosophy", 15.0),
    ("art", 12.0),
    ("culture", 12.0),
    ("music", 10.0),
    ("computer", 10.0),
];

const LENGTH_SCALE: f64 = 200.0;
const LENGTH_OFFSET: f64 = 5.0;
const SINGLE_WORD_BONUS: f64 = 15.0;
const UNQUALIFIED_BONUS: f64 = 10.0;
const DEPTH_DECAY: f64 = 0.1;
const DEPTH_FLOOR: f64 = 0.5;
const MIN_NAME_RANK: f64 = 1.0;


/// How promising a title looks before anything is fetched. Never below 1.
pub fn name_rank(name: &str, depth: u32) -> f64 {
    let name = name.to_lowercase();

    let mut score = LENGTH_SCALE / (name.chars().count() as f64 + LENGTH_OFFSET);

    for (keyword, bonus) in SUBJECT_KEYWORDS {
        if name.contains(keyword) {
            score += bonus;
        }
    }

    if name.split_whitespace().count() == 1 {
        score += SINGLE_WORD_BONUS;
    }

    if !name.contains('(') {
        score += UNQUALIFIED_BONUS;
    }

    score *= depth_multiplier(depth);

    score.max(MIN_NAME_RANK)
}

// Seeds (depth 0) sit slightly above 1.0; everything past depth 6 is floored.
fn depth_multiplier(depth: u32) -> f64 {
    (1.0 - (f64::from(depth) - 1.0) * DEPTH_DECAY).max(DEPTH_FLOOR)
}


/// Post-retrieval quality estimate; the sort key for the top set.
pub fn content_rank(name: &str, depth: u32, content: &PageContent) -> f64 {
    if content.is_empty() {
        return 0.0;
    }

    let body_len = content.body.chars().count() as f64;
    let mut score = (body_len + 10.0).ln();
    score += (content.links.len() as f64).sqrt();
    score += (20.0 - 3.0 * f64::from(depth)).max(0.0);
    score += name_rank(name, depth) / 5.0;
    score
}

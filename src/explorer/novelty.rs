use std::sync::Arc;


/// Scales `vector` to unit length in place. Zero vectors are left as-is.
pub fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}


/// Dot product; equals cosine similarity for unit vectors.
pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    f64::from(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum::<f32>())
}


#[derive(Debug, Default)]
pub struct NoveltyIndex {
    vectors: Vec<Arc<[f32]>>,
}

impl NoveltyIndex {
    pub fn new() -> Self {
        Self::default()
    }


    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Highest similarity against everything inserted so far, `None` when
    /// empty.
    pub fn max_similarity(&self, vector: &[f32]) -> Option<f64> {
        self.vectors
            .iter()
            .map(|stored| dot(stored, vector))
            .fold(None, |best, sim| match best {
                Some(b) if b >= sim => Some(b),
                _ => Some(sim),
            })
    }


    pub fn novelty(&self, vector: &[f32]) -> f64 {
        match self.max_similarity(vector) {
            Some(similarity) => (1.0 - similarity).clamp(0.0, 1.0),
            None => 1.0,
        }
    }

    /// Scores `vector` against the prior contents, then stores it.
    pub fn score_and_insert(&mut self, vector: Arc<[f32]>) -> f64 {
        let novelty = self.novelty(&vector);
        self.vectors.push(vector);
        novelty
    }
}

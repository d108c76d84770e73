use std::collections::HashSet;


const SEED_TOPICS: &[&str] = &[
    // fundamental sciences
    "Mathematics", "Physics", "Chemistry", "Biology", "Astronomy", "Geology", "Computer science",
    "Quantum mechanics", "General relativity", "Thermodynamics", "Electromagnetism",
    "Organic chemistry", "Molecular biology", "Genetics", "Neuroscience", "Astrophysics",
    "Particle physics", "Algebra", "Calculus", "Topology", "Number theory", "Graph theory",
    "Biochemistry", "Evolutionary biology",
    // technology
    "Artificial intelligence", "Machine learning", "Deep learning", "Cryptography", "Blockchain",
    "Quantum computing", "Robotics", "Cybersecurity", "Computer vision",
    "Natural language processing", "Operating system", "Programming language", "Internet",
    "Virtual reality", "Augmented reality", "Internet of Things", "3D printing", "Nanotechnology",
    "Renewable energy", "Autonomous vehicles",
    // history
    "Ancient Egypt", "Ancient Greece", "Ancient Rome", "Ancient China", "Mesopotamia",
    "Mayan civilization", "Inca Empire", "Aztec civilization", "Byzantine Empire",
    "Ottoman Empire", "Mongol Empire", "Renaissance", "Middle Ages", "Industrial Revolution",
    "French Revolution", "World War I", "World War II", "Cold War", "American Civil War",
    "Russian Revolution", "Viking Age",
    // art and architecture
    "Renaissance art", "Impressionism", "Surrealism", "Cubism", "Abstract art", "Baroque",
    "Rococo", "Modern architecture", "Gothic architecture", "Islamic architecture",
    "Ancient Greek architecture", "Romanesque architecture", "Art Deco", "Street art",
    "Graffiti", "Sculpture", "Photography",
    // music
    "Classical music", "Opera", "Jazz", "Rock music", "Hip hop", "Electronic music",
    "Folk music", "Baroque music", "Romantic music", "Blues", "Reggae", "Punk rock", "Symphony",
    "Chamber music",
    // literature and theatre
    "William Shakespeare", "Greek tragedy", "Epic poetry", "Science fiction",
    "Fantasy literature", "Modernist literature", "Victorian literature", "Russian literature",
    "Japanese literature", "Latin American literature", "Postmodern literature", "Theatre",
    "Drama", "Comedy",
    // philosophy and religion
    "Philosophy", "Ethics", "Metaphysics", "Epistemology", "Political philosophy",
    "Existentialism", "Stoicism", "Buddhism", "Hinduism", "Christianity", "Islam", "Judaism",
    "Confucianism", "Taoism",
    // mythology
    "Greek mythology", "Norse mythology", "Egyptian mythology", "Roman mythology",
    "Hindu mythology", "Celtic mythology", "Japanese mythology", "Slavic mythology",
    "Native American mythology",
    // geography and nature
    "country", "capital city", "river", "mountain", "ocean", "desert", "volcano", "earthquake",
    "climate change", "ecology", "biodiversity", "coral reef", "rainforest", "glacier",
    // elements and species
    "chemical element", "mineral", "dinosaur", "extinct animal", "bird", "mammal", "fish",
    "insect",
    // space
    "planet", "star", "galaxy", "black hole", "constellation", "space exploration", "telescope",
    // medicine
    "Medicine", "human disease", "virus", "vaccine", "cancer", "genetic disorder",
    "neuroscience",
    // sport and games
    "Olympic Games", "Football", "Cricket", "Tennis", "Chess", "board game", "card game",
    // society
    "Economics", "Democracy", "Capitalism", "Socialism", "Law", "Human rights", "Feminism",
    "Psychology", "Sociology", "Anthropology", "Linguistics", "Archaeology", "Ethnography",
    // people
    "Nobel Prize", "mathematician", "physicist", "writer", "composer", "painter", "filmmaker",
    // broad queries
    "war", "treaty", "revolution", "empire", "kingdom", "philosopher", "mathematical theorem",
    "physical constant", "literary genre", "film genre", "music genre", "architectural style",
    "art movement", "historical period", "ancient civilization", "world religion",
    // single articles
    "Earth", "Universe", "Human", "Life", "Time", "Energy", "Evolution", "Civilization",
    "Language", "Consciousness", "Internet", "Democracy", "Capitalism", "World War",
];


/// Curated broad topics, first occurrence kept.
pub fn default_seeds() -> Vec<String> {
    dedup(SEED_TOPICS.iter().copied())
}


pub fn dedup<'a>(topics: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    topics
        .into_iter()
        .filter(|t| seen.insert(*t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seeds_unique() {
        let seeds = default_seeds();
        let unique: HashSet<&String> = seeds.iter().collect();
        assert_eq!(unique.len(), seeds.len());
        assert_eq!(seeds.first().map(String::as_str), Some("Mathematics"));
        assert_eq!(seeds.iter().filter(|s| *s == "Internet").count(), 1);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let seeds = dedup(["Neuroscience", "neuroscience", "Neuroscience"]);
        assert_eq!(seeds, vec!["Neuroscience", "neuroscience"]);
    }
}

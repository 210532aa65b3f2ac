use super::*;

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[test]
fn test_hashed_embedding_is_normalised() {
    let embedder = DocumentEmbedder::hashed();
    let vector = embedder.embed("Education shapes society").unwrap();

    assert_eq!(vector.len(), HASHED_EMBEDDING_DIM);
    let norm = dot(&vector, &vector).sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[test]
fn test_hashed_embedding_is_case_insensitive() {
    let embedder = DocumentEmbedder::hashed();
    let a = embedder.embed("Education Matters").unwrap();
    let b = embedder.embed("education matters").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_hashed_embedding_ignores_punctuation() {
    let embedder = DocumentEmbedder::hashed();
    let a = embedder.embed("schools, teachers; students!").unwrap();
    let b = embedder.embed("schools teachers students").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_empty_text_yields_zero_vector() {
    let embedder = DocumentEmbedder::hashed();
    for text in ["", "   ", "?!.,"] {
        let vector = embedder.embed(text).unwrap();
        assert!(vector.iter().all(|&x| x == 0.0), "non-zero vector for {text:?}");
    }
}

#[test]
fn test_identical_texts_have_unit_similarity() {
    let embedder = DocumentEmbedder::hashed();
    let a = embedder.embed("the role of education in society").unwrap();
    let b = embedder.embed("the role of education in society").unwrap();
    assert!((dot(&a, &b) - 1.0).abs() < 1e-5);
}

#[test]
fn test_overlap_scores_higher_than_disjoint() {
    let embedder = DocumentEmbedder::hashed();
    let context = embedder.embed("education and schools").unwrap();
    let related = embedder.embed("schools improve education for everyone").unwrap();
    let unrelated = embedder.embed("volcanoes erupt molten rock").unwrap();

    assert!(dot(&context, &related) > dot(&context, &unrelated));
}

#[test]
fn test_bucket_is_stable_and_in_range() {
    let first = hashed::bucket("education", 512);
    assert_eq!(first, hashed::bucket("education", 512));
    assert!(first < 512);
}

#[test]
fn test_load_without_model_path_is_hashed() {
    let embedder = DocumentEmbedder::load(EmbedderConfig::hashed()).unwrap();
    assert!(embedder.is_hashed());
    assert_eq!(embedder.mode(), "hashed");
    assert_eq!(embedder.dimension(), HASHED_EMBEDDING_DIM);
}

#[test]
fn test_load_missing_model_dir_fails() {
    let err = DocumentEmbedder::load(EmbedderConfig::new("/nonexistent/encoder")).unwrap_err();
    assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
}

#[test]
fn test_load_dir_without_weights_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = DocumentEmbedder::load(EmbedderConfig::new(dir.path())).unwrap_err();
    assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
}

#[test]
fn test_zero_hashed_dim_rejected() {
    let config = EmbedderConfig {
        hashed_dim: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(EmbeddingError::InvalidConfig { .. })
    ));
}

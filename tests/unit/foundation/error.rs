use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PlanError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(
        PlanError::unsupported("x")
            .to_string()
            .contains("unsupported operation:")
    );
    assert!(
        PlanError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PlanError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn invalid_index_reports_index_and_len() {
    let msg = PlanError::invalid_index(7, 3).to_string();
    assert!(msg.contains("step 7"));
    assert!(msg.contains("length 3"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PlanError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        JumpscareError::resource_missing("x")
            .to_string()
            .contains("resource missing:")
    );
    assert!(
        JumpscareError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        JumpscareError::backend_unavailable("x")
            .to_string()
            .contains("audio backend unavailable:")
    );
    assert!(
        JumpscareError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert_eq!(
        JumpscareError::InvalidSurface {
            width: 0,
            height: 4
        }
        .to_string(),
        "invalid surface: 0x4"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = JumpscareError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn exit_codes_follow_taxonomy() {
    assert_eq!(JumpscareError::resource_missing("x").exit_code(), 1);
    assert_eq!(JumpscareError::decode("x").exit_code(), 1);
    assert_eq!(JumpscareError::NoFrames.exit_code(), 1);
    assert_eq!(JumpscareError::backend_unavailable("x").exit_code(), 2);
}

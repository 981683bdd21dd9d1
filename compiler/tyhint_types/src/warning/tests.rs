use super::*;
use pretty_assertions::assert_eq;

#[test]
fn unrecognized_renders_with_code() {
    let warning = HintWarning::unrecognized(&Hint::opaque(3_u8), 2);
    assert_eq!(warning.code(), WarningCode::W0001);
    assert_eq!(warning.depth, 2);
    assert_eq!(
        warning.to_string(),
        "warning[W0001]: could not resolve the type hint `<opaque 3>`; leaving it as-is"
    );
}

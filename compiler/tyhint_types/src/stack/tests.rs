use super::*;

#[test]
fn deep_recursion_does_not_overflow() {
    fn depth(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }
    assert_eq!(depth(100_000), 100_000);
}

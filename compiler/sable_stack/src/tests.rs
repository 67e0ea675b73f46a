use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_deep_recursion_grows_stack() {
    fn count_down(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { count_down(n - 1) + 1 })
    }
    assert_eq!(count_down(100_000), 100_000);
}

#[test]
fn test_passes_result_through() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(7));
    assert_eq!(result, Ok(7));
}

#[test]
fn test_guard_limit() {
    let mut guard = NestingGuard::new(2);
    assert_eq!(guard.enter(), Ok(()));
    assert_eq!(guard.enter(), Ok(()));
    assert_eq!(guard.enter(), Err(NestingExceeded { limit: 2 }));
    assert_eq!(guard.depth(), 2);
    guard.exit();
    assert_eq!(guard.depth(), 1);
    assert_eq!(guard.enter(), Ok(()));
}

#[test]
fn test_exit_saturates() {
    let mut guard = NestingGuard::default();
    guard.exit();
    assert_eq!(guard.depth(), 0);
    assert_eq!(guard.limit(), DEFAULT_MAX_NESTING);
}

struct Walker {
    guard: NestingGuard,
    deepest: usize,
}

#[derive(Debug, PartialEq)]
enum WalkError {
    TooDeep(usize),
}

impl From<NestingExceeded> for WalkError {
    fn from(e: NestingExceeded) -> Self {
        WalkError::TooDeep(e.limit)
    }
}

fn walk(w: &mut Walker, n: usize) -> Result<(), WalkError> {
    NestingGuard::scope(w, |w| &mut w.guard, |w| {
        w.deepest = w.deepest.max(w.guard.depth());
        if n == 0 {
            Ok(())
        } else {
            walk(w, n - 1)
        }
    })
}

#[test]
fn test_scope_balances_depth() {
    let mut w = Walker {
        guard: NestingGuard::new(10),
        deepest: 0,
    };
    assert_eq!(walk(&mut w, 5), Ok(()));
    assert_eq!(w.deepest, 6);
    assert_eq!(w.guard.depth(), 0);
}

#[test]
fn test_scope_reports_limit() {
    let mut w = Walker {
        guard: NestingGuard::new(3),
        deepest: 0,
    };
    assert_eq!(walk(&mut w, 10), Err(WalkError::TooDeep(3)));
    assert_eq!(w.guard.depth(), 0);
}

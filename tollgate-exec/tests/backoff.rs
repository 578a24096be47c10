use std::time::Duration;

use tollgate_exec::RetryPolicy;

#[test]
fn delay_never_exceeds_the_exponential_envelope() {
    let policy = RetryPolicy {
        max_attempts: 5,
        base_delay: Duration::from_millis(100),
        factor: 2.0,
        max_delay: Duration::from_secs(1),
    };

    for attempt in 1..=6u32 {
        let envelope = (100.0 * 2.0f64.powi(attempt as i32 - 1)).min(1000.0) as u64;
        for _ in 0..50 {
            let delay = policy.backoff_delay(attempt);
            assert!(
                delay <= Duration::from_millis(envelope),
                "attempt {attempt}: {delay:?} > {envelope}ms"
            );
        }
    }
}

#[test]
fn delay_is_capped_by_max_delay() {
    let policy = RetryPolicy {
        max_attempts: 10,
        base_delay: Duration::from_secs(5),
        factor: 10.0,
        max_delay: Duration::from_millis(50),
    };

    for _ in 0..50 {
        assert!(policy.backoff_delay(8) <= Duration::from_millis(50));
    }
}

#[test]
fn zero_base_delay_yields_zero() {
    let policy = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::ZERO,
        factor: 2.0,
        max_delay: Duration::from_secs(1),
    };
    assert_eq!(policy.backoff_delay(1), Duration::ZERO);
}

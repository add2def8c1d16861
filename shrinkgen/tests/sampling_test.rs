//! Integration tests for sequential and parallel sampling

use shrinkgen::{
    Arbitrary, ConfigError, GenConfig, GenError, exec, get_global_config, in_range,
    reset_global_config, sample, sample_parallel, set_global_config,
};

#[derive(Arbitrary, Clone, Debug, PartialEq)]
enum Shape {
    Circle { radius: u8 },
    Rect(u8, u8),
}

#[test]
fn test_parallel_matches_sequential_for_derived_types() {
    let generator = Shape::arbitrary();
    for threads in [1, 2, 3, 8] {
        let config = GenConfig::default()
            .with_seed(31)
            .with_samples(50)
            .with_threads(threads);
        assert_eq!(
            sample(&generator, &config).unwrap(),
            sample_parallel(&generator, &config).unwrap()
        );
    }
}

#[test]
fn test_more_threads_than_samples() {
    let config = GenConfig::default()
        .with_seed(5)
        .with_samples(3)
        .with_threads(16);
    let values = sample_parallel(&in_range(0u8, 200), &config).unwrap();
    assert_eq!(values, sample(&in_range(0u8, 200), &config).unwrap());
}

#[test]
fn test_parallel_workers_have_their_own_context() {
    let generator = exec(|| {
        let a = in_range(0u32, 10).pick()?;
        let b = in_range(0u32, 10).pick()?;
        Ok((a, b))
    });
    let config = GenConfig::default()
        .with_seed(8)
        .with_samples(64)
        .with_threads(4);
    let values = sample_parallel(&generator, &config).unwrap();
    assert_eq!(values.len(), 64);
    assert!(values.iter().all(|(a, b)| *a < 10 && *b < 10));
}

#[test]
fn test_parallel_worker_panic_is_resumed() {
    let generator = exec(|| -> Result<u8, GenError> {
        let value = in_range(0u8, 4).pick()?;
        if value == 3 {
            panic!("worker hit {}", value);
        }
        Ok(value)
    });
    let config = GenConfig::default()
        .with_seed(0)
        .with_samples(200)
        .with_threads(4);
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        sample_parallel(&generator, &config)
    }));
    assert!(outcome.is_err());
}

#[test]
fn test_invalid_thread_count() {
    let config = GenConfig::default().with_threads(0);
    assert_eq!(
        sample_parallel(&in_range(0u8, 2), &config),
        Err(GenError::InvalidConfig(ConfigError::InvalidThreads(0)))
    );
}

#[test]
fn test_global_config_drives_sampling() {
    let config = GenConfig::default().with_seed(77).with_samples(12).with_size(0);
    set_global_config(config.clone()).unwrap();
    assert_eq!(get_global_config(), config);

    let values = sample(&in_range(-100i32, 100), &get_global_config()).unwrap();
    assert_eq!(values, vec![0; 12]);

    assert_eq!(
        set_global_config(GenConfig::default().with_samples(0)),
        Err(ConfigError::InvalidSamples(0))
    );
    assert_eq!(get_global_config(), config);

    reset_global_config();
    assert_eq!(get_global_config().seed, None);
}

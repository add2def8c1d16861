//! Drawing plain values out of generators, sequentially or across threads.

use tracing::debug;

use crate::config::GenConfig;
use crate::error::GenError;
use crate::generator::Gen;
use crate::rng::Random;
use crate::shrink::Shrinkable;

/// Root values of `config.samples` invocations, each on its own split of the
/// configured stream
pub fn sample<T: 'static>(generator: &Gen<T>, config: &GenConfig) -> Result<Vec<T>, GenError> {
    config.validate()?;
    debug!(
        samples = config.samples,
        size = config.size,
        seed = ?config.seed,
        "sampling generator"
    );
    let mut random = config.random();
    let values = (0..config.samples)
        .map(|_| {
            generator
                .generate_sized(&random.split(), config.size)
                .map(Shrinkable::into_value)
        })
        .collect::<Result<Vec<T>, GenError>>()?;
    debug!(samples = values.len(), "sampling finished");
    Ok(values)
}

/// Same values as [`sample`] for the same seeded configuration, computed on
/// `config.threads` workers.
///
/// Every worker owns a clone of the generator and its own slice of the
/// pre-split streams, so each one also runs with its own generation context.
/// A panic in a worker is resumed on the calling thread.
pub fn sample_parallel<T>(generator: &Gen<T>, config: &GenConfig) -> Result<Vec<T>, GenError>
where
    T: Send + 'static,
{
    config.validate()?;
    let threads = config.threads.min(config.samples);
    if threads <= 1 {
        return sample(generator, config);
    }

    debug!(
        samples = config.samples,
        threads,
        size = config.size,
        seed = ?config.seed,
        "sampling generator in parallel"
    );
    let mut random = config.random();
    let streams: Vec<Random> = (0..config.samples).map(|_| random.split()).collect();
    let chunk_size = config.samples.div_ceil(threads);
    let size = config.size;

    let batches = crossbeam::scope(|s| {
        let handles: Vec<_> = streams
            .chunks(chunk_size)
            .map(|chunk| {
                let generator = generator.clone();
                s.spawn(move |_| {
                    chunk
                        .iter()
                        .map(|stream| {
                            generator
                                .generate_sized(stream, size)
                                .map(Shrinkable::into_value)
                        })
                        .collect::<Result<Vec<T>, GenError>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect::<Vec<_>>()
    })
    .unwrap_or_else(|payload| std::panic::resume_unwind(payload));

    let mut values = Vec::with_capacity(config.samples);
    for batch in batches {
        values.extend(batch?);
    }
    debug!(samples = values.len(), "parallel sampling finished");
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::exec::exec;
    use crate::primitives::{in_range, integers};

    #[test]
    fn test_sample_is_reproducible() {
        let config = GenConfig::default().with_seed(17).with_samples(25);
        let generator = integers::<u32>();
        let first = sample(&generator, &config).unwrap();
        let second = sample(&generator, &config).unwrap();
        assert_eq!(first.len(), 25);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sample_uses_configured_size() {
        let config = GenConfig::default().with_seed(1).with_samples(10).with_size(0);
        let values = sample(&integers::<i16>(), &config).unwrap();
        assert!(values.iter().all(|v| *v == 0));
    }

    #[test]
    fn test_sample_rejects_invalid_config() {
        let config = GenConfig::default().with_samples(0);
        assert_eq!(
            sample(&integers::<u8>(), &config),
            Err(GenError::InvalidConfig(ConfigError::InvalidSamples(0)))
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let generator = exec(|| {
            let a = in_range(0u64, 1_000).pick()?;
            let b = in_range(0u64, 1_000).pick()?;
            Ok(a * 1_000 + b)
        });
        let config = GenConfig::default()
            .with_seed(2024)
            .with_samples(37)
            .with_threads(4);
        let sequential = sample(&generator, &config).unwrap();
        let parallel = sample_parallel(&generator, &config).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_parallel_propagates_errors() {
        let generator = in_range(3u8, 3);
        let config = GenConfig::default().with_seed(0).with_samples(8).with_threads(2);
        assert!(matches!(
            sample_parallel(&generator, &config),
            Err(GenError::GenerationFailed { .. })
        ));
    }
}

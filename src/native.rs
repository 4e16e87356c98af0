//! 抽象化なしのインライン計算（性能の下限を測るための基準）

use crate::core::{PipelineSpec, Signal};

/// 標準パイプライン ((v + 16) * 60) + 5 を直接計算
#[inline]
pub fn sample(value: f64) -> f64 {
    ((value + 16.0) * 60.0) + 5.0
}

/// Signalを毎段で作り直す形の標準パイプライン
#[inline]
pub fn sample_signal(signal: Signal) -> Signal {
    Signal::new(Signal::new(Signal::new(signal.value() + 16.0).value() * 60.0).value() + 5.0)
}

/// 仕様の演算をループで順に適用
#[inline]
pub fn evaluate(spec: &PipelineSpec, value: f64) -> f64 {
    spec.apply(Signal::new(value)).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_formula() {
        assert_eq!(sample(50.0), 3965.0);
        assert_eq!(sample_signal(Signal::new(50.0)).value(), 3965.0);
    }

    #[test]
    fn test_loop_matches_formula() {
        let spec = PipelineSpec::sample();
        for input in [-16.0, 0.0, 0.3, 50.0] {
            assert_eq!(evaluate(&spec, input).to_bits(), sample(input).to_bits());
        }
    }
}

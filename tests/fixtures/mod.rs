// テスト用の共通データ
#![allow(dead_code)]

use func_chain_perf::{Operation, PipelineSpec};

/// 有限値の代表的な入力
pub const FINITE_INPUTS: &[f64] = &[
    0.0, -0.0, 1.0, -1.0, 50.0, 0.1, -16.0, 1e-300, -1e-300, 123_456.789, 1e15, -7.25e12,
];

/// 浮動小数点の特殊値
pub const SPECIAL_INPUTS: &[f64] = &[f64::INFINITY, f64::NEG_INFINITY, f64::NAN, f64::MAX, f64::MIN];

/// 丸め誤差が順序に依存するパイプライン群
pub fn pipelines() -> Vec<PipelineSpec> {
    vec![
        PipelineSpec::sample(),
        PipelineSpec::identity(),
        PipelineSpec::new(vec![Operation::Multiply(0.1), Operation::Add(0.2), Operation::Multiply(3.0)]),
        PipelineSpec::new(vec![Operation::Add(1e16), Operation::Add(1.0), Operation::Add(-1e16)]),
        PipelineSpec::new(vec![Operation::Multiply(-0.0), Operation::Add(-0.0)]),
        (0..25).fold(PipelineSpec::identity(), |spec, i| {
            spec.then(if i % 2 == 0 {
                Operation::Add(i as f64 * 0.37)
            } else {
                Operation::Multiply(1.0 + i as f64 * 0.01)
            })
        }),
    ]
}

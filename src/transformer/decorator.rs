// デコレータ型の変換器 - 各ステージが内側の変換器を所有し、委譲後に自身の演算を適用

use crate::core::{Operation, PipelineSpec, Signal, Transformer};

/// 入力をそのまま返す変換器（チェーンの終端）
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTransformer;

impl Transformer for IdentityTransformer {
    #[inline(always)]
    fn transform(&self, signal: Signal) -> Signal {
        signal
    }
}

/// 内側の結果に定数項を加算する変換器
pub struct AddTransformer {
    term: f64,
    inner: Box<dyn Transformer>,
}

impl AddTransformer {
    /// 内側を恒等変換とする加算器を作成
    pub fn new(term: f64) -> Self {
        Self::wrapping(term, Box::new(IdentityTransformer))
    }

    /// 既存の変換器を包む加算器を作成
    pub fn wrapping(term: f64, inner: Box<dyn Transformer>) -> Self {
        Self { term, inner }
    }

    pub fn term(&self) -> f64 {
        self.term
    }
}

impl Transformer for AddTransformer {
    fn transform(&self, signal: Signal) -> Signal {
        let inner = self.inner.transform(signal);
        inner.with_value(inner.value() + self.term)
    }
}

/// 内側の結果に定数係数を乗算する変換器
pub struct MultiplyTransformer {
    factor: f64,
    inner: Box<dyn Transformer>,
}

impl MultiplyTransformer {
    /// 内側を恒等変換とする乗算器を作成
    pub fn new(factor: f64) -> Self {
        Self::wrapping(factor, Box::new(IdentityTransformer))
    }

    /// 既存の変換器を包む乗算器を作成
    pub fn wrapping(factor: f64, inner: Box<dyn Transformer>) -> Self {
        Self { factor, inner }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl Transformer for MultiplyTransformer {
    fn transform(&self, signal: Signal) -> Signal {
        let inner = self.inner.transform(signal);
        inner.with_value(inner.value() * self.factor)
    }
}

/// 仕様からデコレータチェーンを構築
///
/// 恒等変換から始めて、リスト順に外側へ包んでいく。ステージごとに1回ヒープ確保する。
pub fn build_decorator_chain(spec: &PipelineSpec) -> Box<dyn Transformer> {
    let identity: Box<dyn Transformer> = Box::new(IdentityTransformer);

    spec.operations().iter().fold(identity, |inner, operation| {
        let outer: Box<dyn Transformer> = match *operation {
            Operation::Add(term) => Box::new(AddTransformer::wrapping(term, inner)),
            Operation::Multiply(factor) => Box::new(MultiplyTransformer::wrapping(factor, inner)),
        };
        outer
    })
}

/// 標準パイプライン Add(5) ∘ Multiply(60) ∘ Add(16) を直接組み立てる
pub fn sample_decorator() -> AddTransformer {
    AddTransformer::wrapping(
        5.0,
        Box::new(MultiplyTransformer::wrapping(
            60.0,
            Box::new(AddTransformer::new(16.0)),
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockTransformer;

    #[test]
    fn test_sample_decorator() {
        let transformer = sample_decorator();
        assert_eq!(transformer.transform(Signal::new(50.0)).value(), 3965.0);
    }

    #[test]
    fn test_build_matches_sample() {
        let built = build_decorator_chain(&PipelineSpec::sample());
        let direct = sample_decorator();

        for input in [-3.5, 0.0, 50.0, 1e9] {
            let signal = Signal::new(input);
            assert_eq!(
                built.transform(signal).value().to_bits(),
                direct.transform(signal).value().to_bits()
            );
        }
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let chain = build_decorator_chain(&PipelineSpec::identity());
        assert_eq!(chain.transform(Signal::new(42.0)).value(), 42.0);
    }

    #[test]
    fn test_add_delegates_to_inner_once() {
        let mut inner = MockTransformer::new();
        inner
            .expect_transform()
            .times(1)
            .returning(|signal| signal.with_value(signal.value() * 2.0));

        let add = AddTransformer::wrapping(1.0, Box::new(inner));
        assert_eq!(add.transform(Signal::new(10.0)).value(), 21.0);
    }

    #[test]
    fn test_multiply_delegates_to_inner_once() {
        let mut inner = MockTransformer::new();
        inner
            .expect_transform()
            .withf(|signal| signal.value() == 3.0)
            .times(1)
            .returning(|signal| signal.with_value(signal.value() + 1.0));

        let mul = MultiplyTransformer::wrapping(10.0, Box::new(inner));
        assert_eq!(mul.transform(Signal::new(3.0)).value(), 40.0);
    }

    #[test]
    fn test_identity_is_neutral_on_both_sides() {
        let plain = AddTransformer::new(7.0);
        let inner_identity = AddTransformer::wrapping(7.0, Box::new(IdentityTransformer));
        let outer_identity = IdentityTransformer;

        let signal = Signal::new(2.0);
        assert_eq!(plain.transform(signal), inner_identity.transform(signal));
        assert_eq!(
            outer_identity.transform(plain.transform(signal)),
            plain.transform(signal)
        );
    }

    #[test]
    fn test_nan_propagates() {
        let transformer = sample_decorator();
        assert!(transformer.transform(Signal::new(f64::NAN)).value().is_nan());
    }
}

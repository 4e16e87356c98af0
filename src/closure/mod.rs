//! クロージャチェーン
//!
//! オブジェクトグラフを持たず、定数オペランドを捕捉した関数値の合成でパイプラインを表現する。
//!
//! - `apply_direct`: 入れ子の関数呼び出しをその場で評価する
//! - `sample_closure`: 同じ入れ子呼び出しを保持する単一のクロージャ（構築時にヒープ確保なし）
//! - `ClosureChain`: 任意の`PipelineSpec`から畳み込みで合成したクロージャ

use crate::core::{Operation, PipelineSpec, Signal};
use std::fmt;

/// 合成済みのシグナル関数
pub type SignalFn = Box<dyn Fn(Signal) -> Signal + Send + Sync>;

/// シグナルに定数項を加算
#[inline(always)]
pub fn add(signal: Signal, term: f64) -> Signal {
    signal.with_value(signal.value() + term)
}

/// シグナルに定数係数を乗算
#[inline(always)]
pub fn multiply(signal: Signal, factor: f64) -> Signal {
    signal.with_value(signal.value() * factor)
}

/// 標準パイプラインを入れ子の呼び出しで即時評価
#[inline]
pub fn apply_direct(signal: Signal) -> Signal {
    add(multiply(add(signal, 16.0), 60.0), 5.0)
}

/// 標準パイプラインを実行するクロージャを返す
///
/// 何も捕捉しないため、構築はゼロサイズ値の生成のみ。
pub fn sample_closure() -> impl Fn(Signal) -> Signal + Copy + Send + Sync {
    |signal| add(multiply(add(signal, 16.0), 60.0), 5.0)
}

/// 仕様から合成したクロージャチェーン
pub struct ClosureChain {
    func: SignalFn,
    stages: usize,
}

impl ClosureChain {
    /// 恒等関数から始めて、各演算で前段のクロージャを包む
    pub fn build(spec: &PipelineSpec) -> Self {
        let identity: SignalFn = Box::new(|signal: Signal| signal);

        let func = spec.operations().iter().fold(identity, |inner, operation| {
            let outer: SignalFn = match *operation {
                Operation::Add(term) => Box::new(move |signal: Signal| add(inner(signal), term)),
                Operation::Multiply(factor) => {
                    Box::new(move |signal: Signal| multiply(inner(signal), factor))
                }
            };
            outer
        });

        Self {
            func,
            stages: spec.len(),
        }
    }

    #[inline]
    pub fn call(&self, signal: Signal) -> Signal {
        (self.func)(signal)
    }

    pub fn stages(&self) -> usize {
        self.stages
    }
}

impl fmt::Debug for ClosureChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureChain")
            .field("stages", &self.stages)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_invocation() {
        assert_eq!(apply_direct(Signal::new(50.0)).value(), 3965.0);
    }

    #[test]
    fn test_sample_closure_is_zero_sized() {
        let closure = sample_closure();
        assert_eq!(std::mem::size_of_val(&closure), 0);
        assert_eq!(closure(Signal::new(50.0)).value(), 3965.0);
    }

    #[test]
    fn test_chain_matches_direct() {
        let chain = ClosureChain::build(&PipelineSpec::sample());
        assert_eq!(chain.stages(), 3);

        for input in [-7.0, 0.1, 50.0, f64::MAX] {
            let signal = Signal::new(input);
            assert_eq!(
                chain.call(signal).value().to_bits(),
                apply_direct(signal).value().to_bits()
            );
        }
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let chain = ClosureChain::build(&PipelineSpec::identity());
        assert_eq!(chain.stages(), 0);
        assert_eq!(chain.call(Signal::new(9.75)).value(), 9.75);
    }

    #[test]
    fn test_order_sensitivity() {
        let add_first = ClosureChain::build(&"add:5,mul:60".parse().unwrap());
        let mul_first = ClosureChain::build(&"mul:60,add:5".parse().unwrap());

        assert_eq!(add_first.call(Signal::new(50.0)).value(), 3300.0);
        assert_eq!(mul_first.call(Signal::new(50.0)).value(), 3005.0);
    }

    #[test]
    fn test_overflow_to_infinity() {
        let chain = ClosureChain::build(&"mul:1e308,mul:10".parse().unwrap());
        assert_eq!(chain.call(Signal::new(10.0)).value(), f64::INFINITY);
    }
}

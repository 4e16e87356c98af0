// タグ付き列挙型による変換器チェーン
//
// デコレータと同じ「内側を包む」構造を保ちつつ、評価は単一のmatchで行う

use crate::core::{Operation, PipelineSpec, Signal, Transformer};

/// 演算種別とオペランドをタグに持つ変換器チェーン
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TransformerChain {
    /// 終端（入力をそのまま返す）
    #[default]
    Identity,
    Add {
        term: f64,
        inner: Box<TransformerChain>,
    },
    Multiply {
        factor: f64,
        inner: Box<TransformerChain>,
    },
}

impl TransformerChain {
    /// 仕様の演算をリスト順に外側へ畳み込んでチェーンを構築
    pub fn build(spec: &PipelineSpec) -> Self {
        spec.operations()
            .iter()
            .fold(Self::Identity, |chain, operation| chain.wrap(*operation))
    }

    /// 1つの演算で現在のチェーンを包む
    pub fn wrap(self, operation: Operation) -> Self {
        match operation {
            Operation::Add(term) => self.add(term),
            Operation::Multiply(factor) => self.multiply(factor),
        }
    }

    pub fn add(self, term: f64) -> Self {
        Self::Add {
            term,
            inner: Box::new(self),
        }
    }

    pub fn multiply(self, factor: f64) -> Self {
        Self::Multiply {
            factor,
            inner: Box::new(self),
        }
    }

    /// 恒等変換を除いたステージ数
    pub fn depth(&self) -> usize {
        match self {
            Self::Identity => 0,
            Self::Add { inner, .. } | Self::Multiply { inner, .. } => 1 + inner.depth(),
        }
    }

    pub fn transform(&self, signal: Signal) -> Signal {
        match self {
            Self::Identity => signal,
            Self::Add { term, inner } => {
                let inner = inner.transform(signal);
                inner.with_value(inner.value() + term)
            }
            Self::Multiply { factor, inner } => {
                let inner = inner.transform(signal);
                inner.with_value(inner.value() * factor)
            }
        }
    }
}

impl Transformer for TransformerChain {
    #[inline(always)]
    fn transform(&self, signal: Signal) -> Signal {
        TransformerChain::transform(self, signal)
    }
}

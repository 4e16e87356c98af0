use crate::core::PipelineSpec;
use crate::strategy::{check_consistency, evaluate_all, StrategyKind};
use anyhow::Result;

/// パイプラインを評価して結果を表示
///
/// 戦略を指定しない場合は全戦略で評価し、結果の一致を検証する。
pub fn execute(
    pipeline: &PipelineSpec,
    input: f64,
    strategy: Option<StrategyKind>,
) -> Result<Vec<(StrategyKind, f64)>> {
    pipeline.validate()?;
    println!("🔢 パイプライン: {} (入力: {input})", display_pipeline(pipeline));

    let results = match strategy {
        Some(kind) => vec![(kind, kind.evaluate(pipeline, input))],
        None => {
            let results = evaluate_all(pipeline, input);
            check_consistency(&results)?;
            results
        }
    };

    for (kind, value) in &results {
        println!("   {:<10} {value}", kind.name());
    }
    if strategy.is_none() {
        println!("✅ 全戦略の結果が一致しました");
    }

    Ok(results)
}

fn display_pipeline(pipeline: &PipelineSpec) -> String {
    if pipeline.is_empty() {
        "identity".to_string()
    } else {
        pipeline.to_string()
    }
}

use crate::benchmarks::PerformanceComparison;
use crate::cli::args::RunArgs;
use crate::config::HarnessConfig;
use anyhow::Result;

impl RunArgs {
    /// 設定ファイル → プリセット → 個別フラグの順に計測条件を組み立てる
    pub fn resolve_config(&self) -> Result<HarnessConfig> {
        let mut config = match (&self.config, &self.preset) {
            (Some(path), _) => HarnessConfig::load(path)?,
            (None, Some(name)) => HarnessConfig::preset(name)?,
            (None, None) => HarnessConfig::default(),
        };

        if let Some(iterations) = self.iterations {
            config = config.with_iterations(iterations);
        }
        if let Some(input) = self.input {
            config = config.with_input(input);
        }
        if let Some(pipeline) = &self.pipeline {
            config = config.with_pipeline(pipeline.clone());
        }
        if let Some(amortized_inputs) = self.amortized_inputs {
            config = config.with_amortized_inputs(amortized_inputs);
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn execute(args: &RunArgs) -> Result<()> {
    let config = args.resolve_config()?;
    tracing::info!(?config, "比較を開始します");

    let mut comparison = PerformanceComparison::new(config);
    comparison.run_full_comparison();

    if let Some(path) = &args.report {
        comparison.export_json_report(path)?;
        println!("📄 詳細レポートを出力しました: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PipelineSpec;

    #[test]
    fn test_resolve_default() {
        let config = RunArgs::default().resolve_config().unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_flags_override_preset() {
        let args = RunArgs {
            preset: Some("quick".to_string()),
            iterations: Some(3),
            pipeline: Some(PipelineSpec::identity()),
            ..Default::default()
        };

        let config = args.resolve_config().unwrap();
        assert_eq!(config.iterations, 3);
        assert_eq!(config.amortized_inputs, 100);
        assert!(config.pipeline.is_empty());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let args = RunArgs {
            iterations: Some(0),
            ..Default::default()
        };
        assert!(args.resolve_config().is_err());
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let args = RunArgs {
            preset: Some("turbo".to_string()),
            ..Default::default()
        };
        let err = args.resolve_config().unwrap_err();
        assert!(err.to_string().contains("turbo"));
    }
}

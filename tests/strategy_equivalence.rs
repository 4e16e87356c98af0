// 戦略間の数値的同一性に関する統合テスト
mod fixtures;

use fixtures::{pipelines, FINITE_INPUTS, SPECIAL_INPUTS};
use func_chain_perf::{
    closure::{apply_direct, sample_closure, ClosureChain},
    core::PipelineStrategy,
    native,
    strategy::{evaluate_all, ClosureStrategy, DecoratorStrategy, TaggedStrategy},
    transformer::{build_decorator_chain, sample_decorator, IdentityTransformer, TransformerChain},
    verify_consistency, Operation, PipelineError, PipelineSpec, Signal, StrategyKind, Transformer,
};
use std::sync::Arc;

#[test]
fn test_reference_scenario() {
    let spec: PipelineSpec = "add:16,mul:60,add:5".parse().unwrap();
    assert_eq!(verify_consistency(&spec, 50.0).unwrap(), 3965.0);

    let signal = Signal::new(50.0);
    assert_eq!(sample_decorator().transform(signal).value(), 3965.0);
    assert_eq!(sample_closure()(signal).value(), 3965.0);
    assert_eq!(apply_direct(signal).value(), 3965.0);
    assert_eq!(native::sample(50.0), 3965.0);
}

#[test]
fn test_all_strategies_bit_identical() {
    for spec in pipelines() {
        for &input in FINITE_INPUTS.iter().chain(SPECIAL_INPUTS) {
            let results = evaluate_all(&spec, input);
            let expected = results[0].1.to_bits();
            for (kind, actual) in results {
                assert_eq!(
                    actual.to_bits(),
                    expected,
                    "strategy {kind} diverged for pipeline '{spec}' on {input}"
                );
            }
        }
    }
}

#[test]
fn test_fixed_forms_match_spec_driven_forms() {
    let spec = PipelineSpec::sample();
    let decorator = build_decorator_chain(&spec);
    let closure = ClosureChain::build(&spec);

    for &input in FINITE_INPUTS {
        let signal = Signal::new(input);
        let expected = native::sample(input).to_bits();

        assert_eq!(sample_decorator().transform(signal).value().to_bits(), expected);
        assert_eq!(decorator.transform(signal).value().to_bits(), expected);
        assert_eq!(sample_closure()(signal).value().to_bits(), expected);
        assert_eq!(closure.call(signal).value().to_bits(), expected);
        assert_eq!(apply_direct(signal).value().to_bits(), expected);
    }
}

#[test]
fn test_identity_is_neutral() {
    let with_identity = PipelineSpec::sample();
    let decorated = build_decorator_chain(&with_identity);
    let wrapped = IdentityTransformer;

    for &input in FINITE_INPUTS {
        let signal = Signal::new(input);
        assert_eq!(
            wrapped.transform(decorated.transform(signal)),
            decorated.transform(wrapped.transform(signal))
        );
        assert_eq!(decorated.transform(signal), decorated.transform(signal));
    }
}

#[test]
fn test_order_sensitivity() {
    let add_first = PipelineSpec::new(vec![Operation::Add(5.0), Operation::Multiply(60.0)]);
    let mul_first = PipelineSpec::new(vec![Operation::Multiply(60.0), Operation::Add(5.0)]);

    assert_eq!(verify_consistency(&add_first, 50.0).unwrap(), 3300.0);
    assert_eq!(verify_consistency(&mul_first, 50.0).unwrap(), 3005.0);
}

#[test]
fn test_repeated_evaluation_returns_same_value() {
    let spec = PipelineSpec::sample();
    let decorator = DecoratorStrategy::build(&spec);
    let tagged = TaggedStrategy::build(&spec);
    let closure = ClosureStrategy::build(&spec);

    for _ in 0..100 {
        assert_eq!(DecoratorStrategy::evaluate(&decorator, 50.0), 3965.0);
        assert_eq!(TaggedStrategy::evaluate(&tagged, 50.0), 3965.0);
        assert_eq!(ClosureStrategy::evaluate(&closure, 50.0), 3965.0);
    }
}

#[test]
fn test_build_twice_yields_identical_results() {
    for spec in pipelines() {
        for kind in StrategyKind::ALL {
            assert_eq!(
                kind.evaluate(&spec, 0.3).to_bits(),
                kind.evaluate(&spec, 0.3).to_bits()
            );
        }
    }
}

#[test]
fn test_shared_chains_across_threads() {
    let spec = PipelineSpec::sample();
    let tagged = Arc::new(TransformerChain::build(&spec));
    let closure = Arc::new(ClosureChain::build(&spec));
    let decorator: Arc<Box<dyn Transformer>> = Arc::new(build_decorator_chain(&spec));

    let sequential: Vec<f64> = (0..64).map(|i| native::sample(i as f64)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tagged = Arc::clone(&tagged);
                let closure = Arc::clone(&closure);
                let decorator = Arc::clone(&decorator);
                scope.spawn(move || {
                    (0..64)
                        .map(|i| {
                            let signal = Signal::new(i as f64);
                            let a = tagged.transform(signal).value();
                            assert_eq!(a, closure.call(signal).value());
                            assert_eq!(a, decorator.transform(signal).value());
                            a
                        })
                        .collect::<Vec<f64>>()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), sequential);
        }
    });
}

#[test]
fn test_invalid_spec_fails_before_evaluation() {
    let err = "add:16,pow:2".parse::<PipelineSpec>().unwrap_err();
    assert_eq!(err, PipelineError::unknown_operation("pow"));
    assert!(err.is_spec_error());
}

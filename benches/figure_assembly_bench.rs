use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use summary_plot::api::{
    PlotBuilder, PlotBuilderConfig, QuerySnapshot, RealizationStyling, ViewSettings,
    assemble_summary_view,
};
use summary_plot::core::{
    EnsembleIdent, LoadedPair, QueryResult, StatisticFunction, StatisticValueObject,
    SubplotGrid, SubplotLimitDirection, VectorRealizationData, VectorSpecification,
    VectorStatisticData, Viewport, VisualizationMode,
};
use summary_plot::render::NullRenderer;

const VECTORS: [&str; 4] = ["FOPT", "FGPT", "FWPT", "FOPR"];

fn specifications(ensembles: usize) -> Vec<VectorSpecification> {
    (0..ensembles)
        .flat_map(|ensemble| {
            VECTORS.iter().map(move |vector| {
                VectorSpecification::new(
                    EnsembleIdent::regular("case", format!("iter-{ensemble}")),
                    *vector,
                    "#1f77b4",
                )
            })
        })
        .collect()
}

fn realizations(count: u32, samples: usize) -> Vec<VectorRealizationData> {
    let timestamps: Vec<i64> = (0..samples as i64).map(|i| i * 86_400_000).collect();
    (0..count)
        .map(|realization| {
            let values = (0..samples)
                .map(|i| i as f64 * (1.0 + f64::from(realization) * 0.01))
                .collect();
            VectorRealizationData::new(realization, timestamps.clone(), values, "SM3", false)
                .expect("valid generated realization")
        })
        .collect()
}

fn statistics(samples: usize) -> VectorStatisticData {
    let timestamps: Vec<i64> = (0..samples as i64).map(|i| i * 86_400_000).collect();
    let value_objects = StatisticFunction::ALL
        .into_iter()
        .enumerate()
        .map(|(offset, statistic_function)| StatisticValueObject {
            statistic_function,
            values: (0..samples).map(|i| (i + offset) as f64).collect(),
        })
        .collect();
    VectorStatisticData {
        realizations: (0..100).collect(),
        timestamps_utc_ms: timestamps,
        value_objects,
        unit: "SM3".to_owned(),
        is_rate: false,
    }
}

fn bench_grid_planning_10k(c: &mut Criterion) {
    c.bench_function("grid_planning_10k", |b| {
        b.iter(|| {
            for n in 1..10_000 {
                let grid = SubplotGrid::plan(black_box(n), SubplotLimitDirection::Rows, 7);
                let _ = grid.position_of(n - 1).expect("position in grid");
            }
        })
    });
}

fn bench_realization_figure_8x100(c: &mut Criterion) {
    let specifications = specifications(2);
    let data = realizations(100, 365);
    let pairs: Vec<LoadedPair<Vec<VectorRealizationData>>> = specifications
        .iter()
        .map(|specification| LoadedPair {
            vector_specification: specification.clone(),
            data: data.clone(),
        })
        .collect();
    let config = PlotBuilderConfig::new(Viewport::new(1920, 1080));

    c.bench_function("realization_figure_8x100", |b| {
        b.iter(|| {
            let mut builder = PlotBuilder::configure(config.clone(), &specifications, None)
                .expect("configure builder");
            builder
                .add_realizations(black_box(&pairs), RealizationStyling::Plain)
                .expect("add realizations");
            builder
                .finalize(&[86_400_000 * 100])
                .expect("finalize figure");
            let mut renderer = NullRenderer::default();
            builder.render(&mut renderer).expect("render figure");
        })
    });
}

fn bench_summary_view_with_statistics(c: &mut Criterion) {
    let specifications = specifications(3);
    let settings = ViewSettings::new(
        specifications.clone(),
        VisualizationMode::StatisticsAndRealizations,
    )
    .with_active_timestamp(Some(86_400_000 * 30));
    let snapshot = QuerySnapshot {
        realizations: specifications
            .iter()
            .map(|_| QueryResult::loaded(realizations(50, 120)))
            .collect(),
        statistics: specifications
            .iter()
            .map(|_| QueryResult::loaded(statistics(120)))
            .collect(),
        ..QuerySnapshot::default()
    };

    c.bench_function("summary_view_with_statistics", |b| {
        b.iter(|| {
            let view = assemble_summary_view(black_box(&settings), black_box(&snapshot), None)
                .expect("assemble view");
            let _ = view
                .figure
                .to_json_contract_v1_pretty()
                .expect("figure json should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_grid_planning_10k,
    bench_realization_figure_8x100,
    bench_summary_view_with_statistics
);
criterion_main!(benches);

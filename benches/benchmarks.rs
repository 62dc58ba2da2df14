//! Benchmarks for the description and flattening of project graphs
//!
//! The graphs are made of many small libraries sharing a common base, which
//! is the shape that stresses the de-duplication the most

use std::path::Path;

use armory_make::{
    domain::target::{BuildMode, BuildTarget, Platform},
    presets::armorcore,
    project_model::{flatten, ProjectDescriptor, ProjectGraph, ProjectId},
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn layered_graph(root: &Path, layers: usize, per_layer: usize) -> (ProjectGraph, ProjectId) {
    let mut graph = ProjectGraph::new();
    let mut previous: Vec<ProjectId> = Vec::new();

    for layer in 0..layers {
        let mut current = Vec::with_capacity(per_layer);
        for index in 0..per_layer {
            let mut project = ProjectDescriptor::new(format!("lib_{layer}_{index}"), root)
                .expect("The benchmark root directory must exist");
            for file in 0..16 {
                project
                    .add_source(format!("Sources/{layer}/{index}/file_{file}.cpp"))
                    .expect("Relative sources always resolve");
                project
                    .add_include_dir(format!("Sources/{}", file % 4))
                    .expect("Relative include dirs always resolve");
            }
            project.add_library(format!("lib_{}", index % 8));
            project.add_define(format!("LAYER_{layer}"));
            for dependency in &previous {
                project.add_sub_project(*dependency);
            }
            current.push(graph.add(project));
        }
        previous = current;
    }

    let mut app = ProjectDescriptor::new("App", root).expect("The benchmark root must exist");
    for dependency in &previous {
        app.add_sub_project(*dependency);
    }
    let app = graph.add(app);

    (graph, app)
}

pub fn flatten_benchmark(c: &mut Criterion) {
    let temp = tempfile::tempdir().expect("Failed to create the benchmark directory");
    let (graph, root) = layered_graph(temp.path(), 8, 8);

    c.bench_function("Flatten a layered graph of 64 libraries", |b| {
        b.iter(|| flatten(black_box(&graph), black_box(root)))
    });

    let target = BuildTarget::new(Platform::Linux, BuildMode::Release);
    let flags = armorcore::default_flags();
    c.bench_function("Describe and flatten the armorcore runtime", |b| {
        b.iter(|| {
            let mut graph = ProjectGraph::new();
            let root = armorcore::describe(
                &mut graph,
                black_box(&target),
                black_box(&flags),
                temp.path(),
                temp.path(),
                None,
            )
            .expect("The armorcore description must succeed");
            flatten(&graph, root)
        })
    });
}

criterion_group!(benches, flatten_benchmark);
criterion_main!(benches);

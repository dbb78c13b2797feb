//! Benchmarks for projection and binding walks.
//!
//! Run with: cargo bench -p formwork-form --bench bind_bench

use std::collections::HashMap;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use formwork_core::record;
use formwork_form::{EditForm, FieldType, UiSource, UiValue};

#[derive(Default)]
struct Wide {
    text: String,
    count: i64,
    ratio: f64,
    flag: bool,
}

record!(Wide {
    "Text" => text,
    "Count" => count,
    "Ratio" => ratio,
    "Flag" => flag,
});

struct MapUi(HashMap<String, UiValue>);

impl UiSource for MapUi {
    fn read(&self, name: &str, _: FieldType) -> Option<UiValue> {
        self.0.get(name).cloned()
    }
}

/// A form of `rows` rows, each binding all four members of [`Wide`].
fn make_form(rows: usize) -> EditForm {
    let mut form = EditForm::new("", "Wide");
    for _ in 0..rows {
        form.row(4)
            .add_input(1, "Text", "Text")
            .add_number(1, "Count", "Count", "1")
            .add_decimal(1, "Ratio", "Ratio", 2, "0.01")
            .add_check(1, "Flag", "Flag");
    }
    form
}

fn make_ui() -> MapUi {
    let mut m = HashMap::new();
    m.insert("Text".to_owned(), UiValue::Text("hello".into()));
    m.insert("Count".to_owned(), UiValue::Text("1234".into()));
    m.insert("Ratio".to_owned(), UiValue::Text("0.125".into()));
    m.insert("Flag".to_owned(), UiValue::Checked(true));
    MapUi(m)
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("form/project");
    let record = Wide {
        text: "abc".into(),
        count: 7,
        ratio: 1.5,
        flag: true,
    };
    for rows in [1, 16, 128] {
        group.throughput(Throughput::Elements(rows as u64 * 4));
        let mut form = make_form(rows);
        group.bench_with_input(BenchmarkId::new("rows", rows), &rows, |b, _| {
            b.iter(|| black_box(form.project(Some(&record))))
        });
    }
    group.finish();
}

fn bench_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("form/bind");
    let ui = make_ui();
    for rows in [1, 16, 128] {
        group.throughput(Throughput::Elements(rows as u64 * 4));
        let form = make_form(rows);
        group.bench_with_input(BenchmarkId::new("rows", rows), &rows, |b, _| {
            b.iter(|| {
                let mut record = Wide::default();
                black_box(form.bind(&ui, Some(&mut record)))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_project, bench_bind);
criterion_main!(benches);

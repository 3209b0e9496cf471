//! Benchmarks for netlist parsing and writing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sparnet_parser::{parse, write_netlist};

/// A chain of `n` waveguides between two grating couplers.
fn chain_netlist(n: usize) -> String {
    let mut text = String::from("* benchmark netlist\n");
    text.push_str(" gc_0 N$-1 N$0 ebeam_gc_te1550 lay_x=0 lay_y=0\n");
    for i in 0..n {
        text.push_str(&format!(
            " wg_{i} N${i} N${next} ebeam_wg_integral_1550 wg_length=10u wg_width=0.5u points=\"[[{x0},0],[{x1},0]]\" lay_x={xc} lay_y=0\n",
            i = i,
            next = i + 1,
            x0 = i * 10,
            x1 = (i + 1) * 10,
            xc = i * 10 + 5,
        ));
    }
    text.push_str(&format!(" gc_1 N$-2 N${} ebeam_gc_te1550 lay_x={} lay_y=0\n", n, n * 10));
    text.push_str(".ends\n");
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [10, 100, 1000] {
        let text = chain_netlist(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text)).unwrap());
        });
    }
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let netlist = parse(&chain_netlist(1000)).unwrap();
    c.bench_function("write_1000", |b| b.iter(|| write_netlist(black_box(&netlist))));
}

criterion_group!(benches, bench_parse, bench_write);
criterion_main!(benches);

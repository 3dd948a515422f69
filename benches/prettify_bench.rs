use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use testdox::prettify;

const INPUTS: &[(&str, &str)] = &[
    ("short", "TestSum"),
    ("camel", "TestSumCorrectlySumsInputNumbers"),
    ("initialisms", "TestParseJSON_CorrectlyParsesASingleGoTestJSONOutputLine"),
    ("subtest", "TestExtractFiles/Truncated_bzip2_which_will_return_an_error"),
    ("joined", "TestReadExtended/nyc-taxi-data-100k.csv"),
];

fn bench_prettify(c: &mut Criterion) {
    let mut group = c.benchmark_group("prettify");
    for (label, input) in INPUTS {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), input, |b, input| {
            b.iter(|| prettify(black_box(input)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_prettify);
criterion_main!(benches);

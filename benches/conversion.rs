use std::fs;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use csv_consolidate::convert::{build_mapping, convert, ConversionOptions};
use csv_consolidate::ingestion::csv::{read_first_column_from_reader, reader_builder};

fn single_column_csv(rows: usize) -> String {
    let mut s = String::with_capacity(rows * 12);
    for i in 0..rows {
        if i % 50 == 0 {
            s.push('\n');
        }
        s.push_str(&format!("value-{i},extra\n"));
    }
    s
}

fn bench_read_first_column(c: &mut Criterion) {
    let input = single_column_csv(100_000);
    c.bench_function("read_first_column_100k_rows", |b| {
        b.iter(|| {
            let mut rdr = reader_builder().from_reader(black_box(input.as_bytes()));
            read_first_column_from_reader(&mut rdr).unwrap()
        })
    });
}

fn bench_convert_dir(c: &mut Criterion) {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("data");
    fs::create_dir(&data).unwrap();
    let contents = single_column_csv(2_000);
    for i in 0..50 {
        fs::write(data.join(format!("file_{i:03}.csv")), &contents).unwrap();
    }
    let opts = ConversionOptions {
        input_dir: data,
        output_path: root.path().join("tx.json"),
        ..Default::default()
    };

    c.bench_function("build_mapping_50_files", |b| {
        b.iter(|| build_mapping(black_box(&opts)).unwrap())
    });
    c.bench_function("convert_50_files", |b| b.iter(|| convert(black_box(&opts)).unwrap()));
}

criterion_group!(benches, bench_read_first_column, bench_convert_dir);
criterion_main!(benches);

//! Benchmarks for marker preprocessing
//!
//! Run with: cargo bench markup

use editlock::markup::preprocess;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// Annotated level source: locked setup, editable blocks and inline sections
fn generate_level(blocks: usize) -> String {
    let mut source = String::from(
        "#BEGIN_PROPERTIES#\n{\"version\": \"1.2\", \"commandsIntroduced\": [\"map.placeObject\"]}\n#END_PROPERTIES#\n",
    );
    for i in 0..blocks {
        source.push_str(&format!("function block{}(map) {{\n", i));
        source.push_str(&format!("    var speed = #{{#{}#}}#;\n", i));
        source.push_str("#BEGIN_EDITABLE#\n    map.placeObject(1, 1, 'block');\n\n\n#END_EDITABLE#\n");
        source.push_str("}\n");
    }
    source.push_str("#END_OF_START_LEVEL#\nmap.validate();\n");
    source
}

#[divan::bench(args = [10, 100, 1000])]
fn preprocess_level(bencher: divan::Bencher, blocks: usize) {
    let source = generate_level(blocks);
    bencher.bench_local(|| divan::black_box(preprocess(&source)));
}

#[divan::bench(args = [1_000, 10_000])]
fn preprocess_plain_text(bencher: divan::Bencher, lines: usize) {
    let source = "The quick brown fox jumps over the lazy dog.\n".repeat(lines);
    bencher.bench_local(|| divan::black_box(preprocess(&source)));
}

#[divan::bench(args = [10, 100])]
fn preprocess_dense_sections(bencher: divan::Bencher, per_line: usize) {
    let line = "x#{#ab#}#".repeat(per_line);
    let source = format!("{}\n", line).repeat(200);
    bencher.bench_local(|| divan::black_box(preprocess(&source)));
}

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use fsmgen_compiler::{Options, compile, describe, validate};

// --- Declarations ---

fn circuit_breaker() -> syn::ItemStruct {
    syn::parse_quote! {
        struct CbmDeclaration {
            #[on = r#"Try:"HalfOpened""#]
            Opened: (),
            #[on = r#"Success:"Closed",Failure:"Opened""#]
            HalfOpened: (),
            #[on = r#"Failure:"Opened",Panic:"Terminal",Error:"Terminal""#]
            Closed: (),
            Terminal: (),
        }
    }
}

/// A ring of `n` states, each with a forward, backward and exit event.
fn ring(n: usize) -> syn::ItemStruct {
    let mut body = String::new();
    for i in 0..n {
        let next = (i + 1) % n;
        let prev = (i + n - 1) % n;
        body.push_str(&format!(
            "#[on = r#\"Next:\"S{next}\",Prev:\"S{prev}\",Quit:\"Done\"\"#]\nS{i}: (),\n"
        ));
    }
    body.push_str("Done: (),\n");
    syn::parse_str(&format!("struct RingDeclaration {{\n{body}}}")).unwrap()
}

// --- Benchmark Functions ---

fn benchmark_compile(c: &mut Criterion) {
    let small = circuit_breaker();
    let large = ring(200);
    let options = Options::default();

    c.bench_function("compile_circuit_breaker", |b| {
        b.iter(|| compile(black_box(&small), &options).unwrap())
    });

    c.bench_function("compile_ring_200", |b| {
        b.iter(|| compile(black_box(&large), &options).unwrap())
    });
}

fn benchmark_describe(c: &mut Criterion) {
    let compiled = compile(&ring(200), &Options::default()).unwrap();
    let machine: &validate::Machine = &compiled.machine;

    c.bench_function("describe_ring_200", |b| {
        b.iter(|| describe::describe(black_box(machine)))
    });
}

fn benchmark_render(c: &mut Criterion) {
    let compiled = compile(&ring(50), &Options::default()).unwrap();

    c.bench_function("render_ring_50", |b| b.iter(|| compiled.render().unwrap()));
}

criterion_group!(benches, benchmark_compile, benchmark_describe, benchmark_render);
criterion_main!(benches);

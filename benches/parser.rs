//! Parser benchmarks
//!
//! Run with: cargo bench --bench parser

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tspile::parse;

/// Expression-heavy input exercising precedence climbing
const EXPRESSIONS: &str = r#"
let a = 1 + 2 * 3 - 4 / 5 % 6;
let b = (a + 1) * (a - 1);
let c = a < b && b > 0 || !done;
let d = values[i] + obj.field.nested;
let e = f(1, 2)(3)[4].g;
"#;

/// Statement-heavy input exercising the recursive-descent paths
const STATEMENTS: &str = r#"
const nom: string = "Lucie";
let age: number = 17;

function saluer(n: string): void {
  console.log("Bonjour " + n);
}

if (age >= 18) {
  majeur = true;
} else {
  majeur = false;
}

let notes: number[] = [12, 15, 9];
for (let i = 0; i < notes.length; i++) {
  console.log("Note :", notes[i]);
}

let compteur: number = 3;
while (compteur > 0) {
  console.log("Compte :", compteur);
  compteur--;
}
"#;

/// Declarations that carry type information
const DECLARATIONS: &str = r#"
type Id = number | string;

interface Utilisateur {
  nom: string;
  age?: number;
}

class Calculateur {
  private valeur: number;

  constructor(valeurInitiale: number = 0) {
    this.valeur = valeurInitiale;
  }

  getValeur(): number {
    return this.valeur;
  }
}
"#;

fn bench_parser(c: &mut Criterion) {
    let cases = [
        ("expressions", EXPRESSIONS),
        ("statements", STATEMENTS),
        ("declarations", DECLARATIONS),
    ];

    let mut group = c.benchmark_group("parser");
    for (name, source) in cases {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let (program, diagnostics) = parse(black_box(source));
                (program.body.len(), diagnostics.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);

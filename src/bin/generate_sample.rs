use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Mean and standard deviation of one measurement.
type Dist = (f64, f64);

struct Profile {
    species: &'static str,
    /// (island, number of birds)
    islands: &'static [(&'static str, usize)],
    bill_length: Dist,
    bill_depth: Dist,
    flipper_length: Dist,
    body_mass: Dist,
}

const PROFILES: [Profile; 3] = [
    Profile {
        species: "Adelie",
        islands: &[("Torgersen", 52), ("Biscoe", 44), ("Dream", 56)],
        bill_length: (38.8, 2.7),
        bill_depth: (18.3, 1.2),
        flipper_length: (190.0, 6.5),
        body_mass: (3700.0, 460.0),
    },
    Profile {
        species: "Gentoo",
        islands: &[("Biscoe", 124)],
        bill_length: (47.5, 3.1),
        bill_depth: (15.0, 1.0),
        flipper_length: (217.2, 6.5),
        body_mass: (5076.0, 504.0),
    },
    Profile {
        species: "Chinstrap",
        islands: &[("Dream", 68)],
        bill_length: (48.8, 3.3),
        bill_depth: (18.4, 1.1),
        flipper_length: (195.8, 7.1),
        body_mass: (3733.0, 384.0),
    },
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, (mean, std_dev): Dist) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn round_to(v: f64, step: f64) -> f64 {
    (v / step).round() * step
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut species = Vec::new();
    let mut island = Vec::new();
    let mut bill_length: Vec<Option<f64>> = Vec::new();
    let mut bill_depth: Vec<Option<f64>> = Vec::new();
    let mut flipper_length: Vec<Option<f64>> = Vec::new();
    let mut body_mass: Vec<Option<f64>> = Vec::new();
    let mut sex: Vec<Option<&str>> = Vec::new();
    let mut year = Vec::new();

    for profile in &PROFILES {
        for &(isl, n) in profile.islands {
            for i in 0..n {
                // Roughly one bird in fifty was not measured.
                let measured = rng.next_f64() > 0.02;
                let measure = |rng: &mut SimpleRng, dist: Dist, step: f64| {
                    let v = round_to(rng.gauss(dist), step);
                    measured.then_some(v)
                };

                species.push(profile.species);
                island.push(isl);
                bill_length.push(measure(&mut rng, profile.bill_length, 0.1));
                bill_depth.push(measure(&mut rng, profile.bill_depth, 0.1));
                flipper_length.push(measure(&mut rng, profile.flipper_length, 1.0));
                body_mass.push(measure(&mut rng, profile.body_mass, 25.0));
                sex.push(if !measured || rng.next_f64() < 0.03 {
                    None
                } else if i % 2 == 0 {
                    Some("male")
                } else {
                    Some("female")
                });
                year.push(2007 + (i * 3 / n) as i64);
            }
        }
    }

    let n_rows = species.len();

    let schema = Arc::new(Schema::new(vec![
        Field::new("species", DataType::Utf8, false),
        Field::new("island", DataType::Utf8, false),
        Field::new("bill_length_mm", DataType::Float64, true),
        Field::new("bill_depth_mm", DataType::Float64, true),
        Field::new("flipper_length_mm", DataType::Float64, true),
        Field::new("body_mass_g", DataType::Float64, true),
        Field::new("sex", DataType::Utf8, true),
        Field::new("year", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(species)),
            Arc::new(StringArray::from(island)),
            Arc::new(Float64Array::from(bill_length)),
            Arc::new(Float64Array::from(bill_depth)),
            Arc::new(Float64Array::from(flipper_length)),
            Arc::new(Float64Array::from(body_mass)),
            Arc::new(StringArray::from(sex)),
            Arc::new(Int64Array::from(year)),
        ],
    )?;

    // Write Parquet
    let output_path = "penguins_sample.parquet";
    let file = std::fs::File::create(output_path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("Wrote {n_rows} penguins to {output_path}");
    Ok(())
}

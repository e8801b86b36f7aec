use anyhow::{Context, Result};

/// Approximate economically active population (thousands) in 2015 and the
/// typical unemployment rate (%) per region.
const REGIONS: [(&str, f64, f64); 17] = [
    ("서울특별시", 5_350.0, 4.2),
    ("부산광역시", 1_760.0, 3.8),
    ("대구광역시", 1_260.0, 3.6),
    ("인천광역시", 1_550.0, 4.4),
    ("광주광역시", 760.0, 3.1),
    ("대전광역시", 790.0, 3.3),
    ("울산광역시", 600.0, 3.5),
    ("세종특별자치시", 120.0, 2.4),
    ("경기도", 6_650.0, 3.9),
    ("강원특별자치도", 790.0, 2.8),
    ("충청북도", 870.0, 2.5),
    ("충청남도", 1_150.0, 3.0),
    ("전북특별자치도", 930.0, 2.4),
    ("전라남도", 980.0, 2.7),
    ("경상북도", 1_470.0, 3.2),
    ("경상남도", 1_800.0, 3.4),
    ("제주특별자치도", 360.0, 2.1),
];

const YEARS: std::ops::RangeInclusive<i32> = 2015..=2024;

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
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "경제활동_통합.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["년도", "지역", "경제활동인구 (천명)", "취업자 (천명)", "실업자 (천명)"])?;

    let mut rows = 0usize;
    for year in YEARS {
        let t = (year - YEARS.start()) as f64;
        let (mut total_active, mut total_employed, mut total_unemployed) = (0.0, 0.0, 0.0);

        for &(region, base_active, base_rate) in &REGIONS {
            // ~0.8% yearly growth, COVID dip in 2020
            let growth = 1.0 + 0.008 * t + rng.gauss(0.0, 0.004);
            let shock = if year == 2020 { 1.2 } else { 1.0 };
            let active = (base_active * growth).round();
            let rate = (base_rate * shock + rng.gauss(0.0, 0.3)).clamp(0.5, 15.0);
            let unemployed = (active * rate / 100.0).round();
            let employed = active - unemployed;

            writer.write_record([
                year.to_string(),
                region.to_string(),
                active.to_string(),
                employed.to_string(),
                unemployed.to_string(),
            ])?;
            total_active += active;
            total_employed += employed;
            total_unemployed += unemployed;
            rows += 1;
        }

        writer.write_record([
            year.to_string(),
            "계".to_string(),
            total_active.to_string(),
            total_employed.to_string(),
            total_unemployed.to_string(),
        ])?;
    }

    writer.flush().context("flushing CSV")?;
    println!(
        "Wrote {rows} regional rows for {} years (plus totals) to {output_path}",
        YEARS.count()
    );
    Ok(())
}

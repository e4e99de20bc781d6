use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (category, payload range kg, success probability)
const BOOSTERS: [(&str, (f64, f64), f64); 5] = [
    ("v1.0", (0.0, 700.0), 0.2),
    ("v1.1", (500.0, 4500.0), 0.35),
    ("FT", (2000.0, 9600.0), 0.8),
    ("B4", (2500.0, 6800.0), 0.55),
    ("B5", (3000.0, 9600.0), 1.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut all_flight: Vec<i64> = Vec::new();
    let mut all_site: Vec<String> = Vec::new();
    let mut all_class: Vec<i64> = Vec::new();
    let mut all_payload: Vec<f64> = Vec::new();
    let mut all_booster: Vec<String> = Vec::new();

    for flight in 1..=56 {
        // Older boosters fly the early flights.
        let era = ((flight - 1) * BOOSTERS.len() / 56).min(BOOSTERS.len() - 1);
        let (booster, (lo, hi), p_success) = BOOSTERS[era];
        let site = rng.pick(&SITES);
        let payload = (lo + rng.next_f64() * (hi - lo)).round();
        let class = i64::from(rng.next_f64() < p_success);

        all_flight.push(flight as i64);
        all_site.push(site.to_string());
        all_class.push(class);
        all_payload.push(payload);
        all_booster.push(booster.to_string());
    }

    // Write CSV
    let csv_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version Category",
        ])
        .expect("Failed to write CSV header");
    for i in 0..all_flight.len() {
        writer
            .write_record([
                all_flight[i].to_string(),
                all_site[i].clone(),
                all_class[i].to_string(),
                format!("{:.1}", all_payload[i]),
                all_booster[i].clone(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // Build Arrow arrays
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let n_rows = all_flight.len();
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(all_flight)),
            Arc::new(StringArray::from(all_site)),
            Arc::new(Int64Array::from(all_class)),
            Arc::new(Float64Array::from(all_payload)),
            Arc::new(StringArray::from(all_booster)),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "spacex_launch_dash.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {n_rows} launches to {csv_path} and {parquet_path}");
}

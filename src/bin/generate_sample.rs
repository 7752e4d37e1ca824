use chrono::{Datelike, Duration, NaiveDate};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Expected rentals for an hour of day: commuter peaks at 08:00 and 17:30
/// on top of a daytime base load.
fn diurnal_demand(hour: u8) -> f64 {
    let h = f64::from(hour);
    20.0 + gaussian(h, 8.0, 1.5, 260.0) + gaussian(h, 17.5, 2.0, 300.0) + gaussian(h, 13.0, 3.0, 80.0)
}

/// Rentals drop as the weather worsens.
fn weather_factor(weathersit: u8) -> f64 {
    match weathersit {
        1 => 1.0,
        2 => 0.8,
        3 => 0.45,
        _ => 0.15,
    }
}

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

    /// Sample a weathersit code; mostly clear, rarely heavy precipitation.
    fn weathersit(&mut self) -> u8 {
        let roll = self.next_f64();
        if roll < 0.66 {
            1
        } else if roll < 0.92 {
            2
        } else if roll < 0.99 {
            3
        } else {
            4
        }
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let first = NaiveDate::from_ymd_opt(2011, 1, 1).expect("valid date");
    let last = NaiveDate::from_ymd_opt(2012, 12, 31).expect("valid date");

    let output_path = "main_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["instant", "dteday", "season", "hr", "weathersit", "cnt"])
        .expect("Failed to write header");

    let mut instant: u64 = 0;
    let mut weathersit = 1u8;
    let mut day = first;

    while day <= last {
        // Mild seasonal swing: more rentals in summer than winter.
        let season_angle = (day.ordinal() as f64 / 365.25) * 2.0 * std::f64::consts::PI;
        let seasonal = 0.75 + 0.25 * (season_angle - std::f64::consts::FRAC_PI_2).sin();
        let weekend = matches!(day.weekday().number_from_monday(), 6 | 7);
        let season = match day.month() {
            3..=5 => 2,
            6..=8 => 3,
            9..=11 => 4,
            _ => 1,
        };

        for hour in 0u8..24 {
            // Weather persists across hours, occasionally re-rolled.
            if rng.next_f64() < 0.15 {
                weathersit = rng.weathersit();
            }

            let mut demand = diurnal_demand(hour) * seasonal * weather_factor(weathersit);
            if weekend {
                // Weekends trade the commute spikes for a flatter curve.
                demand = demand * 0.6 + 40.0 * seasonal;
            }
            let cnt = rng.gauss(demand, demand * 0.15).round().max(0.0) as u64;

            instant += 1;
            writer
                .write_record([
                    instant.to_string(),
                    day.format("%Y-%m-%d").to_string(),
                    season.to_string(),
                    hour.to_string(),
                    weathersit.to_string(),
                    cnt.to_string(),
                ])
                .expect("Failed to write row");
        }

        day += Duration::days(1);
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {instant} hourly records to {output_path}");
}

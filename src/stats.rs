use tabled::builder::Builder;
use tabled::settings::Style;

use crate::derive::BookRow;

/// Count, mean, sample standard deviation, min, quartiles and max of one
/// column. Everything but `count` is NaN for an empty column; `std` is also
/// NaN for a single value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Describe {
    pub fn of(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                median: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let sq_dev: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (sq_dev / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }
}

// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub columns: Vec<(&'static str, Describe)>,
}

impl Summary {
    pub fn of(rows: &[BookRow]) -> Self {
        let column = |pick: fn(&BookRow) -> f64| -> Describe {
            Describe::of(&rows.iter().map(pick).collect::<Vec<_>>())
        };

        Self {
            columns: vec![
                ("판매지수", column(|row| row.sale_index)),
                ("리뷰 수", column(|row| row.review_count)),
                ("판매가", column(|row| row.sale_price)),
                ("할인율", column(|row| row.discount_pct)),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&Describe> {
        self.columns
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, describe)| describe)
    }

    /// One line per statistic, one column per summarized field.
    pub fn render_table(&self) -> String {
        let mut builder = Builder::default();

        let mut header = vec![String::new()];
        header.extend(self.columns.iter().map(|(name, _)| (*name).to_owned()));
        builder.push_record(header);

        let stats: [(&str, fn(&Describe) -> f64); 8] = [
            ("count", |d| d.count as f64),
            ("mean", |d| d.mean),
            ("std", |d| d.std),
            ("min", |d| d.min),
            ("25%", |d| d.q25),
            ("50%", |d| d.median),
            ("75%", |d| d.q75),
            ("max", |d| d.max),
        ];
        for (label, pick) in stats {
            let mut line = vec![label.to_owned()];
            line.extend(
                self.columns
                    .iter()
                    .map(|(_, describe)| format!("{:.2}", pick(describe))),
            );
            builder.push_record(line);
        }

        let mut table = builder.build();
        table.with(Style::psql());
        table.to_string()
    }
}

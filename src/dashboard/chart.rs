use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCount {
    pub month: &'static str,
    pub client: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesConfig {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartWidget {
    pub title: &'static str,
    pub description: &'static str,
    pub series: SeriesConfig,
    pub data: Vec<MonthCount>,
    /// Percent change between the last two months, one decimal.
    pub trend_percent: Option<f64>,
}

const TOTAL_CLIENTS: [(&str, u32); 6] = [
    ("January", 186),
    ("February", 305),
    ("March", 237),
    ("April", 73),
    ("May", 209),
    ("June", 214),
];

pub fn total_clients_chart() -> ChartWidget {
    let data: Vec<MonthCount> = TOTAL_CLIENTS
        .iter()
        .map(|&(month, client)| MonthCount { month, client })
        .collect();
    let trend_percent = trend_percent(&data);

    ChartWidget {
        title: "Total Leads Cover",
        description: "Recent Leads.",
        series: SeriesConfig {
            key: "client",
            label: "Client",
            color: "hsl(var(--chart-1))",
        },
        data,
        trend_percent,
    }
}

fn trend_percent(data: &[MonthCount]) -> Option<f64> {
    let [.., previous, last] = data else {
        return None;
    };
    if previous.client == 0 {
        return None;
    }
    let change = (f64::from(last.client) - f64::from(previous.client)) / f64::from(previous.client) * 100.0;
    Some((change * 10.0).round() / 10.0)
}

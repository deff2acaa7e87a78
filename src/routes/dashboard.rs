use axum::Json;

use crate::dashboard::chart::{total_clients_chart, ChartWidget};
use crate::dashboard::navigation::{admin_navigation, Navigation};

pub async fn handle_navigation() -> Json<Navigation> {
    Json(admin_navigation())
}

pub async fn handle_total_clients_chart() -> Json<ChartWidget> {
    Json(total_clients_chart())
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::routes::test_support::{app, send};

    #[tokio::test]
    async fn navigation_lists_admin_sections() {
        let (status, body) = send(app(), Method::GET, "/api/admin/navigation", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["brand"], "Client Management");
        let hrefs: Vec<_> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["href"].as_str().unwrap())
            .collect();
        assert_eq!(hrefs, vec!["/admin", "/admin/leads", "/admin/clientInfo"]);
    }

    #[tokio::test]
    async fn chart_serves_series_and_trend() {
        let (status, body) =
            send(app(), Method::GET, "/api/admin/charts/total-clients", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Total Leads Cover");
        assert_eq!(body["series"]["key"], "client");
        assert_eq!(body["data"][0]["month"], "January");
        assert_eq!(body["data"][0]["client"], 186);
        assert_eq!(body["trend_percent"], 2.4);
    }
}

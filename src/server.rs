use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::error::Error;
use crate::formatters::{format_history, format_weather};
use crate::history::HistoryStore;
use crate::models::{AddCityRequest, GetWeatherRequest, RemoveCityRequest};
use crate::weather::WeatherService;

/// MCP front end over the search history and the weather lookup
#[derive(Clone)]
pub struct WeatherServer {
    history: Arc<HistoryStore>,
    weather: WeatherService,
    tool_router: ToolRouter<Self>,
}

impl WeatherServer {
    pub fn new(history: HistoryStore, weather: WeatherService) -> Self {
        Self {
            history: Arc::new(history),
            weather,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_mcp_error(err: Error) -> McpError {
    let message = format!("{} ({})", err.user_message(), err);
    match err {
        Error::InvalidResponse(_) => McpError::invalid_params(message, None),
        _ => McpError::internal_error(message, None),
    }
}

#[tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather-lookup-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Looks up current weather and a five day forecast by city name, \
                and keeps a history of searched cities."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WeatherServer {
    /// Lists previously searched cities
    #[tool(description = "List previously searched cities with their ids.")]
    async fn list_cities(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("Listing search history");

        let cities = self.history.list().await.map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format_history(&cities))]))
    }

    /// Adds a city to the search history
    #[tool(description = "Add a city name to the search history.")]
    async fn add_city(
        &self,
        Parameters(request): Parameters<AddCityRequest>,
    ) -> Result<CallToolResult, McpError> {
        let city = self.history.append(&request.name).await.map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Added {} with id {}",
            city.name, city.id
        ))]))
    }

    /// Removes a city from the search history
    #[tool(description = "Remove a city from the search history by id. Unknown ids are ignored.")]
    async fn remove_city(
        &self,
        Parameters(request): Parameters<RemoveCityRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.history.remove(&request.id).await.map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Removed id {}",
            request.id
        ))]))
    }

    /// Gets current weather and the daily forecast for a city
    #[tool(description = "Get current weather and up to five daily forecasts for a city name (e.g., 'Paris' or 'Austin'). The city is also recorded in the search history.")]
    async fn get_weather_for_city(
        &self,
        Parameters(request): Parameters<GetWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        let records = self
            .weather
            .get_weather_for_city(&request.city)
            .await
            .map_err(to_mcp_error)?;

        if let Err(e) = self.history.append(&request.city).await {
            tracing::warn!("Failed to record {} in search history: {}", request.city, e);
        }

        Ok(CallToolResult::success(vec![Content::text(format_weather(&records))]))
    }
}

use cp_app::App;
use tracing::{info_span, Instrument};

use super::dto::NavigationDto;
use super::error::map_err;

/// Resolve `path` through the route guard.
pub async fn navigate(app: &App, path: String) -> Result<NavigationDto, String> {
    let span = info_span!("command.navigation.navigate", path = %path);
    async {
        let navigation = app.navigate(&path).await.map_err(map_err)?;
        Ok(NavigationDto::from(navigation))
    }
    .instrument(span)
    .await
}

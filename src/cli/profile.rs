//! Profile operations for the signed-in user.

use std::io::Write;

use yukchi::{AppServices, ClientError, ListingFilter, YukchiConfig};

use super::output::{write_line, write_listings, write_profile};

/// Shows the signed-in user's profile followed by their cargos.
///
/// # Errors
///
/// Returns [`ClientError::NotAuthenticated`] without a session, the API
/// failure, or [`ClientError::Io`] when writing fails.
pub async fn show<W: Write>(services: &AppServices, writer: &mut W) -> Result<(), ClientError> {
    let profile = services.auth().profile().await?;
    write_profile(writer, &profile)?;
    write_line(writer, "")?;

    let cargos = services.cargo().user_cargos().await;
    let listed: Vec<_> = cargos.iter().collect();
    write_listings(writer, &listed, &ListingFilter::default())
}

/// Applies the profile options to the signed-in user's profile.
///
/// # Errors
///
/// Returns [`ClientError::NotAuthenticated`] without a session,
/// [`ClientError::Validation`] for invalid input, the API failure, or
/// [`ClientError::Io`] when writing fails.
pub async fn update<W: Write>(
    config: &YukchiConfig,
    services: &AppServices,
    writer: &mut W,
) -> Result<(), ClientError> {
    let profile = services
        .auth()
        .update_profile(&config.profile_form())
        .await?;
    write_profile(writer, &profile)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use yukchi::telemetry::NoopTelemetrySink;
    use yukchi::{AppServices, ClientError, YukchiConfig};

    use super::show;

    #[tokio::test]
    async fn profile_requires_a_session() {
        let config = YukchiConfig {
            api_url: Some("http://127.0.0.1:9/".to_owned()),
            profile: true,
            ..Default::default()
        };
        let (services, _) = AppServices::start(&config, Arc::new(NoopTelemetrySink))
            .await
            .expect("services should start");
        let mut buffer = Vec::new();

        let result = show(&services, &mut buffer).await;

        assert!(matches!(result, Err(ClientError::NotAuthenticated)));
        assert!(buffer.is_empty());
    }
}

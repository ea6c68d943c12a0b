use common::persistence::spawn_expiry_sweeper;
use common::util::state::{GenerateSettings, ImageApiSettings, JobStoreSettings};
use service::routes::create_app;
use service::state::ServiceCollection;
use tracing::info;
use std::env;
use std::net::{SocketAddr, IpAddr, Ipv6Addr};
use std::time::Duration;

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::fmt().json().finish();
    tracing::subscriber::set_global_default(subscriber).expect("Could not init tracing.");

    let max_age = get_max_age();
    let settings = GenerateSettings {
        image_api: ImageApiSettings {
            api_uri: get_api_uri(),
            api_key: get_api_key(),
            model: get_model(),
            size: get_size(),
            timeout: get_generation_timeout(),
        },
        job_store: JobStoreSettings {
            max_age,
            max_jobs: get_max_jobs(),
        },
        max_prompt_length: get_max_prompt_length(),
        callback_timeout: Duration::from_secs(10),
    };

    let services = ServiceCollection::build(&settings).expect("Could not build services.");
    spawn_expiry_sweeper(services.job_persistence.clone(), get_sweep_interval(max_age));

    let app = create_app(services, Duration::from_secs(59));

    let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)), get_port());
    info!("listening on {}", &addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("Server stopped unexpectedly.");
}

fn get_api_key() -> String {
    env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set.")
}

fn get_api_uri() -> String {
    env::var("IMAGE_API_URI").unwrap_or_else(|_| "https://api.openai.com".to_string())
}

fn get_model() -> String {
    env::var("IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".to_string())
}

fn get_size() -> String {
    env::var("IMAGE_SIZE").unwrap_or_else(|_| "1024x1024".to_string())
}

fn get_generation_timeout() -> Duration {
    let timeout = env::var("GENERATION_TIMEOUT_MILLIS").map(|timeout| timeout.parse::<u64>());

    let timeout = match timeout {
        Ok(Ok(timeout)) if timeout > 0 => timeout,
        _ => 8000,
    };
    Duration::from_millis(timeout)
}

fn get_max_age() -> Duration {
    let max_age = env::var("MAX_AGE_SECONDS").map(|expire| expire.parse::<u64>());

    let max_age = match max_age {
        Ok(Ok(max_age)) => max_age,
        _ => 60 * 60 * 25,
    };
    Duration::from_secs(max_age)
}

fn get_sweep_interval(max_age: Duration) -> Duration {
    max_age.clamp(Duration::from_secs(1), Duration::from_secs(60))
}

fn get_max_jobs() -> usize {
    let max_jobs = env::var("MAX_JOBS").map(|max_jobs| max_jobs.parse::<usize>());
    match max_jobs {
        Ok(Ok(max_jobs)) if max_jobs > 0 => max_jobs,
        _ => 10_000,
    }
}

fn get_max_prompt_length() -> usize {
    let max_prompt_length = env::var("MAX_PROMPT_LENGTH").map(|length| length.parse::<usize>());
    match max_prompt_length {
        Ok(Ok(max_prompt_length)) if max_prompt_length > 0 => max_prompt_length,
        _ => 4000,
    }
}

fn get_port() -> u16 {
    let port = env::var("PORT").map(|port| port.parse::<u16>());
    match port {
        Ok(Ok(port)) => port,
        _ => 8000,
    }
}

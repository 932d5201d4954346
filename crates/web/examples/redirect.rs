use http::{Request, StatusCode};
use http_body_util::BodyExt;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;
use weft_http::protocol::RequestHeader;
use weft_web::{Body, Context, RedirectTarget, ResponseError};

fn require_login(ctx: &mut Context) -> Result<bool, ResponseError> {
    if ctx.request().header("cookie").is_some() {
        return Ok(false);
    }
    ctx.redirect(RedirectTarget::back_or("/login"))?;
    Ok(true)
}

fn profile(ctx: &mut Context) -> Result<(), ResponseError> {
    let response = ctx.response_mut();
    response.set_body(Body::json(serde_json::json!({ "name": "ann", "roles": ["admin"] })))?;
    response.insert_header("x-served-by", "profile")
}

async fn run(request: Request<()>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut ctx = Context::new(RequestHeader::from(request));
    info!(path = ctx.request().uri().path(), "handling request");

    if !require_login(&mut ctx)? {
        profile(&mut ctx)?;
    }

    let (_request, response) = ctx.into_parts();
    let http_response = response.into_http()?;
    let status: StatusCode = http_response.status();
    let (parts, body) = http_response.into_parts();
    let bytes = body.collect().await?.to_bytes();

    info!(%status, headers = ?parts.headers, body = %String::from_utf8_lossy(&bytes), "response materialized");
    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let anonymous = Request::builder().uri("/profile").header("Accept", "text/html").body(()).unwrap();
    let signed_in = Request::builder().uri("/profile").header("Cookie", "session=1").body(()).unwrap();

    for request in [anonymous, signed_in] {
        if let Err(e) = run(request).await {
            error!(cause = %e, "request failed");
        }
    }
}

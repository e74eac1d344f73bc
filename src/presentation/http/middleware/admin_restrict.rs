// src/presentation/http/middleware/admin_restrict.rs
use crate::application::error::ApplicationError;
use crate::presentation::http::error::HttpError;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use ipnet::IpNet;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

const FORWARDED_FOR: &str = "x-forwarded-for";

pub const DEFAULT_ADMIN_AREA: &str = "admin";

/// Which path prefixes are restricted and which networks may reach them.
/// The admin area, where the admin API is mounted, is always restricted.
#[derive(Debug, Clone)]
pub struct AdminAccessPolicy {
    admin_area: String,
    areas: Vec<String>,
    allowed_subnets: Vec<IpNet>,
}

fn normalize_area(area: &str) -> String {
    area.trim().trim_matches('/').to_string()
}

impl AdminAccessPolicy {
    /// Prefixes are given without the leading slash. A blank `admin_area`
    /// falls back to `admin`.
    pub fn new(admin_area: &str, restricted_prefixes: &[String], allowed_subnets: Vec<IpNet>) -> Self {
        let admin_area = Some(normalize_area(admin_area))
            .filter(|area| !area.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_AREA.to_string());

        let mut areas: Vec<String> = restricted_prefixes
            .iter()
            .map(|area| normalize_area(area))
            .filter(|area| !area.is_empty())
            .collect();
        areas.push(admin_area.clone());

        Self {
            admin_area,
            areas,
            allowed_subnets,
        }
    }

    /// Where the admin API router is nested, e.g. `/admin/api`.
    pub fn admin_api_path(&self) -> String {
        format!("/{}/api", self.admin_area)
    }

    /// A path is restricted when it is an area root or lies beneath one.
    pub fn is_restricted(&self, path: &str) -> bool {
        let path = path.trim_start_matches('/');
        self.areas.iter().any(|area| {
            path.strip_prefix(area.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    pub fn is_allowed(&self, ip: IpAddr) -> bool {
        let ip = ip.to_canonical();
        self.allowed_subnets.iter().any(|net| net.contains(&ip))
    }
}

/// Parse a CIDR block, or a bare address as a single-host network.
pub fn parse_subnet(value: &str) -> Result<IpNet, String> {
    let value = value.trim();
    value
        .parse::<IpNet>()
        .or_else(|_| value.parse::<IpAddr>().map(IpNet::from))
        .map_err(|_| format!("invalid subnet: {value}"))
}

/// Last `X-Forwarded-For` hop when present, else the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.rsplit(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// Reject requests to restricted areas from outside the allowed subnets.
pub async fn restrict_admin_area(
    State(policy): State<Arc<AdminAccessPolicy>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !policy.is_restricted(req.uri().path()) {
        return next.run(req).await;
    }

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    let raw_ip = client_ip(req.headers(), peer).unwrap_or_default();

    match raw_ip.parse::<IpAddr>() {
        Ok(ip) if policy.is_allowed(ip) => next.run(req).await,
        _ => {
            tracing::warn!(ip = %raw_ip, path = %req.uri().path(), "disallowed admin access");
            HttpError::from_error(ApplicationError::validation(format!(
                "Disallowed IP address: {raw_ip}"
            )))
            .into_response()
        }
    }
}

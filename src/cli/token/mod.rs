//! Issue and verify commands - token operations against the configured secret

use anyhow::{anyhow, bail};
use clap::Args;

use crate::config::AppConfig;
use crate::domain::token::{ClaimValue, Claims};
use crate::infrastructure::auth::{JwtService, TokenService};

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Subject the token is issued to
    #[arg(long)]
    pub user_id: String,

    /// Extra claim as key=value; repeatable
    #[arg(long = "claim", value_name = "KEY=VALUE", value_parser = parse_claim)]
    pub claims: Vec<(String, ClaimValue)>,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Compact token, with or without a `Bearer ` prefix
    #[arg(long)]
    pub token: String,

    /// User the token must belong to
    #[arg(long)]
    pub user_id: String,
}

/// Print a freshly signed token
pub fn issue(args: IssueArgs) -> anyhow::Result<()> {
    let service = load_service()?;
    let token = service.issue(build_claims(args)?)?;

    println!("{}", token);
    Ok(())
}

/// Print `valid` or the rejection cause; an invalid token is an error
pub fn verify(args: VerifyArgs) -> anyhow::Result<()> {
    let service = load_service()?;
    let token = args.token.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();

    match service.check(token, &args.user_id) {
        Ok(claims) => {
            println!("valid");
            if let Some(exp) = claims.expires_at() {
                println!("expires at {}", format_timestamp(exp));
            }
            Ok(())
        }
        Err(e) => bail!("invalid: {}", e),
    }
}

fn load_service() -> anyhow::Result<JwtService> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    Ok(JwtService::from_settings(&config.jwt)?)
}

fn build_claims(args: IssueArgs) -> anyhow::Result<Claims> {
    let mut claims = Claims::new(args.user_id);

    for (name, value) in args.claims {
        if !claims.insert(name.as_str(), value) {
            bail!("claim '{}' is set by the issuer and cannot be overridden", name);
        }
    }

    Ok(claims)
}

fn parse_claim(raw: &str) -> anyhow::Result<(String, ClaimValue)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{}'", raw))?;

    let name = name.trim();
    if name.is_empty() {
        bail!("claim name must not be empty");
    }

    Ok((name.to_string(), ClaimValue::parse_lenient(value)))
}

fn format_timestamp(seconds: i64) -> String {
    chrono::DateTime::from_timestamp(seconds, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| seconds.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_claim() {
        assert_eq!(
            parse_claim("role=admin").unwrap(),
            ("role".to_string(), ClaimValue::from("admin"))
        );
        assert_eq!(
            parse_claim("level=3").unwrap(),
            ("level".to_string(), ClaimValue::Integer(3))
        );
        assert_eq!(
            parse_claim("expr=a=b").unwrap(),
            ("expr".to_string(), ClaimValue::from("a=b"))
        );
    }

    #[test]
    fn test_parse_claim_rejects_bad_input() {
        assert!(parse_claim("no-separator").is_err());
        assert!(parse_claim("=value").is_err());
    }

    #[test]
    fn test_build_claims_rejects_registered_names() {
        let args = IssueArgs {
            user_id: "alice".to_string(),
            claims: vec![("exp".to_string(), ClaimValue::Integer(0))],
        };

        assert!(build_claims(args).is_err());
    }

    #[test]
    fn test_build_claims() {
        let args = IssueArgs {
            user_id: "alice".to_string(),
            claims: vec![("admin".to_string(), ClaimValue::Bool(true))],
        };

        let claims = build_claims(args).unwrap();
        assert_eq!(claims.user_id(), "alice");
        assert_eq!(claims.get("admin"), Some(&ClaimValue::Bool(true)));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00+00:00");
    }
}

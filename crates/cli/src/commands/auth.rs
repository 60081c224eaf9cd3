use anyhow::{Context, Result};

use taskdeck_client::api::AuthApi;

use super::{print_json, Ctx};

pub async fn login(ctx: &Ctx, email: &str, password: &str) -> Result<()> {
    let user = AuthApi::login(&ctx.client, email, password)
        .await
        .context("Login failed")?;

    if ctx.json {
        return print_json(&user);
    }
    println!("Signed in as {} <{}> ({})", user.name, user.email, user.role.label());
    Ok(())
}

pub fn logout(ctx: &Ctx) -> Result<()> {
    AuthApi::logout(&ctx.client).context("Could not clear the session")?;
    if !ctx.json {
        println!("Signed out");
    }
    Ok(())
}

pub async fn whoami(ctx: &Ctx, remote: bool) -> Result<()> {
    let user = if remote {
        Some(
            AuthApi::profile(&ctx.client)
                .await
                .context("Failed to load profile")?,
        )
    } else {
        AuthApi::current_user(&ctx.client)
    };

    if ctx.json {
        return print_json(&user);
    }
    match user {
        Some(user) => println!("{} <{}> ({}, id {})", user.name, user.email, user.role.label(), user.id),
        None => println!("Not signed in"),
    }
    Ok(())
}

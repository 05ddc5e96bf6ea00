use minijinja::{context, Environment};

use crate::builder::UiAssets;

// The `.html` names turn on minijinja's HTML auto-escaping.
const SWAGGER_TEMPLATE: (&str, &str) = ("swagger.html", include_str!("../assets/swagger.html"));
const REDOC_TEMPLATE: (&str, &str) = ("redoc.html", include_str!("../assets/redoc.html"));

fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    for (name, source) in [SWAGGER_TEMPLATE, REDOC_TEMPLATE] {
        env.add_template(name, source)?;
    }
    Ok(env)
}

pub(crate) fn swagger_ui(
    title: &str,
    openapi_path: &str,
    assets: &UiAssets,
) -> Result<String, minijinja::Error> {
    environment()?.get_template(SWAGGER_TEMPLATE.0)?.render(context! {
        title => title,
        openapi_path => openapi_path,
        swagger_js_url => assets.swagger_js_url.as_str(),
        swagger_css_url => assets.swagger_css_url.as_str(),
    })
}

pub(crate) fn redoc_ui(
    title: &str,
    openapi_path: &str,
    assets: &UiAssets,
) -> Result<String, minijinja::Error> {
    environment()?.get_template(REDOC_TEMPLATE.0)?.render(context! {
        title => title,
        openapi_path => openapi_path,
        redoc_js_url => assets.redoc_js_url.as_str(),
    })
}

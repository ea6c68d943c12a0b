use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RootDto<'a> {
    pub version: &'a str,
    pub name: &'a str,
    pub _links: RootLinks<'a>,
}

#[derive(Debug, Serialize)]
pub struct RootLinks<'a> {
    pub generate: &'a str,
}

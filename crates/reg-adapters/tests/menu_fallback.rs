use async_trait::async_trait;
use reg_adapters::{AdapterError, DataSource, FallbackLoader, JsonFileSource, StaticSource};
use reg_domain::{default_menu, Locale, MenuSection};
use std::io::Write;

/// API de navegación que nunca responde.
struct DownApi;

#[async_trait]
impl DataSource<Vec<MenuSection>> for DownApi {
    fn name(&self) -> &str {
        "api"
    }

    async fn load(&self) -> Result<Vec<MenuSection>, AdapterError> {
        Err(AdapterError::Source("503 Service Unavailable".into()))
    }
}

fn chain(path: &std::path::Path) -> FallbackLoader<Vec<MenuSection>> {
    FallbackLoader::new().then(DownApi)
                         .then(JsonFileSource::new("local-file", path))
                         .then(StaticSource::new("builtin", default_menu()))
}

#[tokio::test]
async fn local_file_is_used_when_api_is_down() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file,
           r#"[{{"id":"home","title":{{"en":"Home","ar":"الرئيسية"}},"links":[{{"label":"Start","href":"/"}}]}}]"#).unwrap();

    let loaded = chain(file.path()).load().await.unwrap();
    assert_eq!(loaded.source, "local-file");
    assert_eq!(loaded.value[0].title.resolve(Locale::Ar), "الرئيسية");
}

#[tokio::test]
async fn corrupt_file_falls_back_to_builtin_menu() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let loaded = chain(file.path()).load().await.unwrap();
    assert_eq!(loaded.source, "builtin");
    assert_eq!(loaded.value, default_menu());
}

//! Templates embedded in the binary, addressed by id.

pub struct TemplateEntry {
    pub id: &'static str,
    pub body: &'static str,
    pub executable: bool,
}

macro_rules! entry {
    ($id:literal, $executable:literal) => {
        TemplateEntry {
            id: $id,
            body: include_str!(concat!("../../../templates/", $id)),
            executable: $executable,
        }
    };
    ($id:literal) => {
        entry!($id, false)
    };
}

static CATALOG: &[TemplateEntry] = &[
    entry!("app/gradlew", true),
    entry!("app/gradlew.bat"),
    entry!("app/gradle/gradle-wrapper.properties"),
    entry!("app/settings.gradle"),
    entry!("app/build.gradle"),
    entry!("app/synthetic.xml"),
    entry!("app/xl-rest-endpoints.xml"),
    entry!("app/xl-ui-plugin.xml"),
    entry!("app/package.json"),
    entry!("app/karma.conf.js"),
    entry!("app/runtests.py"),
    entry!("app/README.md"),
    entry!("app/gitignore"),
    entry!("tile/TileScript.py"),
    entry!("tile/tile-app.js"),
    entry!("tile/tile-controller.js"),
    entry!("tile/tile-controller.spec.js"),
    entry!("tile/tile.css"),
    entry!("tile/tile-summary-view.html"),
    entry!("tile/tile-details-view.html"),
];

pub fn find(id: &str) -> Option<&'static TemplateEntry> {
    CATALOG.iter().find(|entry| entry.id == id)
}

pub fn ids() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|entry| entry.id)
}

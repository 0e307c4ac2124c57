// File-system selection - native open/save/folder dialogs behind simple async calls
//
// Every helper first resolves a StorageProvider from the anchor requesting the dialog
// (normally the window's component). When no provider can be resolved - the component
// is gone, the window has no native handle yet, or the platform has no dialogs - the
// helper returns its "no result" value without opening anything. User cancellation
// looks the same to callers.
//
// Dialogs must be driven from the UI thread; await these helpers inside
// crate::ui::dispatch::spawn_on_ui.

use async_trait::async_trait;
use camino::Utf8PathBuf;
use raw_window_handle::HasWindowHandle;
use rfd::{AsyncFileDialog, FileHandle};
use slint::{ComponentHandle, Weak};

/// A file-system entry chosen in a dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageItem {
    pub name: String,

    /// `None` for entries with no local path (virtual or remote storage)
    pub local_path: Option<Utf8PathBuf>,
}

impl StorageItem {
    pub fn local(path: impl Into<Utf8PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.file_name().unwrap_or_default().to_string(),
            local_path: Some(path),
        }
    }

    pub fn virtual_item(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_path: None,
        }
    }
}

/// A named group of glob patterns shown in a dialog's type selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypeFilter {
    pub name: String,
    /// Glob patterns such as `*.tmx`
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenFileOptions {
    pub title: String,
    pub allow_multiple: bool,
    pub filters: Vec<FileTypeFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderOptions {
    pub title: String,
    pub allow_multiple: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveFileOptions {
    pub title: String,
    /// Extension without separator, appended when the user types a bare name
    pub default_extension: Option<String>,
    pub filters: Vec<FileTypeFilter>,
}

/// Platform dialog service.
///
/// Futures are not `Send`: native dialogs belong to the UI thread.
#[async_trait(?Send)]
pub trait StorageProvider {
    /// Show an open dialog; empty when cancelled
    async fn open_files(&self, options: &OpenFileOptions) -> Vec<StorageItem>;

    /// Show a folder dialog; empty when cancelled
    async fn open_folders(&self, options: &FolderOptions) -> Vec<StorageItem>;

    /// Show a save dialog; `None` when cancelled
    async fn save_file(&self, options: &SaveFileOptions) -> Option<StorageItem>;
}

/// Something a dialog can be opened for, usually a window's component.
pub trait StorageAnchor {
    /// The provider for this anchor, or `None` if dialogs are unavailable
    fn storage_provider(&self) -> Option<Box<dyn StorageProvider>>;
}

/// Glob pattern for an extension: `"log"`, `".log"` and `"*.log"` all give `"*.log"`.
pub fn normalize_extension(extension: &str) -> String {
    let extension = extension.trim();
    if extension.starts_with("*.") {
        extension.to_string()
    } else if extension.starts_with('.') {
        format!("*{}", extension)
    } else {
        format!("*.{}", extension)
    }
}

/// [`normalize_extension`] over a list, preserving order
pub fn extension_patterns<S: AsRef<str>>(extensions: &[S]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| normalize_extension(ext.as_ref()))
        .collect()
}

/// Filter named after the comma-joined extensions, matching their glob patterns
fn extension_filter<S: AsRef<str>>(extensions: &[S]) -> FileTypeFilter {
    let name = extensions
        .iter()
        .map(|ext| ext.as_ref())
        .collect::<Vec<_>>()
        .join(", ");

    FileTypeFilter {
        name,
        patterns: extension_patterns(extensions),
    }
}

fn open_options<S: AsRef<str>>(
    title: &str,
    extensions: &[S],
    allow_multiple: bool,
) -> OpenFileOptions {
    OpenFileOptions {
        title: title.to_string(),
        allow_multiple,
        filters: vec![extension_filter(extensions)],
    }
}

/// Let the user choose one file with one of `extensions`.
///
/// # Returns
/// The file's local path, or `None` if cancelled or no provider is available
pub async fn pick_file<A, S>(anchor: &A, title: &str, extensions: &[S]) -> Option<Utf8PathBuf>
where
    A: StorageAnchor + ?Sized,
    S: AsRef<str>,
{
    let provider = resolve_provider(anchor, title)?;

    let items = provider
        .open_files(&open_options(title, extensions, false))
        .await;

    let path = items.into_iter().next().and_then(|item| item.local_path);
    log_selection(title, path.as_ref());
    path
}

/// Let the user choose any number of files with one of `extensions`.
///
/// Items without a local path are left out.
///
/// # Returns
/// Local paths in selection order; empty if cancelled or no provider is available
pub async fn pick_files<A, S>(anchor: &A, title: &str, extensions: &[S]) -> Vec<Utf8PathBuf>
where
    A: StorageAnchor + ?Sized,
    S: AsRef<str>,
{
    let Some(provider) = resolve_provider(anchor, title) else {
        return Vec::new();
    };

    let items = provider
        .open_files(&open_options(title, extensions, true))
        .await;

    let selected = items.len();
    let paths: Vec<Utf8PathBuf> = items
        .into_iter()
        .filter_map(|item| {
            if item.local_path.is_none() {
                tracing::debug!("Ignoring selection without local path: {}", item.name);
            }
            item.local_path
        })
        .collect();

    tracing::info!(
        "{}: {} of {} selected items have local paths",
        title,
        paths.len(),
        selected
    );
    paths
}

/// Let the user choose one folder.
///
/// # Returns
/// The folder's local path, or `None` if cancelled or no provider is available
pub async fn pick_folder<A>(anchor: &A, title: &str) -> Option<Utf8PathBuf>
where
    A: StorageAnchor + ?Sized,
{
    let provider = resolve_provider(anchor, title)?;

    let options = FolderOptions {
        title: title.to_string(),
        allow_multiple: false,
    };
    let items = provider.open_folders(&options).await;

    let path = items.into_iter().next().and_then(|item| item.local_path);
    log_selection(title, path.as_ref());
    path
}

/// Let the user choose where to save a file of type `default_extension`.
///
/// The extension is both the only filter and the default extension.
///
/// # Returns
/// The chosen path, or `None` if cancelled or no provider is available
pub async fn pick_save_file<A>(
    anchor: &A,
    title: &str,
    default_extension: &str,
) -> Option<Utf8PathBuf>
where
    A: StorageAnchor + ?Sized,
{
    let provider = resolve_provider(anchor, title)?;

    let pattern = normalize_extension(default_extension);
    let bare_extension = pattern.trim_start_matches("*.").to_string();
    let options = SaveFileOptions {
        title: title.to_string(),
        default_extension: Some(bare_extension),
        filters: vec![extension_filter(&[default_extension])],
    };

    let path = provider
        .save_file(&options)
        .await
        .and_then(|item| item.local_path);
    log_selection(title, path.as_ref());
    path
}

fn resolve_provider<A>(anchor: &A, title: &str) -> Option<Box<dyn StorageProvider>>
where
    A: StorageAnchor + ?Sized,
{
    let provider = anchor.storage_provider();
    if provider.is_none() {
        tracing::debug!("No storage provider available for dialog: {}", title);
    }
    provider
}

fn log_selection(title: &str, path: Option<&Utf8PathBuf>) {
    match path {
        Some(path) => tracing::info!("{}: selected {}", title, path),
        None => tracing::debug!("{}: no selection", title),
    }
}

/// Storage provider backed by `rfd`'s native async dialogs, parented to a Slint window.
pub struct RfdStorageProvider<T: ComponentHandle> {
    ui_weak: Weak<T>,
}

impl<T: ComponentHandle> RfdStorageProvider<T> {
    pub fn new(ui_weak: Weak<T>) -> Self {
        Self { ui_weak }
    }

    fn dialog(&self, title: &str) -> AsyncFileDialog {
        let dialog = AsyncFileDialog::new().set_title(title);
        match self.ui_weak.upgrade() {
            Some(ui) => dialog.set_parent(&ui.window().window_handle()),
            None => dialog,
        }
    }
}

/// rfd filters take bare extensions rather than glob patterns
fn add_filters(mut dialog: AsyncFileDialog, filters: &[FileTypeFilter]) -> AsyncFileDialog {
    for filter in filters {
        let extensions: Vec<&str> = filter
            .patterns
            .iter()
            .map(|pattern| pattern.trim_start_matches('*').trim_start_matches('.'))
            .collect();
        dialog = dialog.add_filter(filter.name.as_str(), extensions.as_slice());
    }
    dialog
}

fn to_storage_item(handle: FileHandle) -> StorageItem {
    let name = handle.file_name();
    let local_path = Utf8PathBuf::try_from(handle.path().to_path_buf())
        .map_err(|e| {
            tracing::error!("Failed to convert path to UTF-8: {}", e);
            e
        })
        .ok();

    StorageItem { name, local_path }
}

#[async_trait(?Send)]
impl<T: ComponentHandle + 'static> StorageProvider for RfdStorageProvider<T> {
    async fn open_files(&self, options: &OpenFileOptions) -> Vec<StorageItem> {
        tracing::debug!("Open rfd::AsyncFileDialog: {}", options.title);
        let dialog = add_filters(self.dialog(&options.title), &options.filters);

        let handles = if options.allow_multiple {
            dialog.pick_files().await.unwrap_or_default()
        } else {
            dialog.pick_file().await.into_iter().collect()
        };
        tracing::debug!("rfd::AsyncFileDialog closed");

        handles.into_iter().map(to_storage_item).collect()
    }

    async fn open_folders(&self, options: &FolderOptions) -> Vec<StorageItem> {
        tracing::debug!("Open rfd::AsyncFileDialog (folder): {}", options.title);
        let dialog = self.dialog(&options.title);

        let handles = if options.allow_multiple {
            dialog.pick_folders().await.unwrap_or_default()
        } else {
            dialog.pick_folder().await.into_iter().collect()
        };
        tracing::debug!("rfd::AsyncFileDialog closed");

        handles.into_iter().map(to_storage_item).collect()
    }

    async fn save_file(&self, options: &SaveFileOptions) -> Option<StorageItem> {
        tracing::debug!("Open rfd::AsyncFileDialog (save): {}", options.title);
        let dialog = add_filters(self.dialog(&options.title), &options.filters);

        let handle = dialog.save_file().await;
        tracing::debug!("rfd::AsyncFileDialog closed");

        let mut item = to_storage_item(handle?);
        if let (Some(path), Some(extension)) =
            (item.local_path.as_mut(), &options.default_extension)
        {
            if path.extension().is_none() {
                path.set_extension(extension);
                item.name = path.file_name().unwrap_or_default().to_string();
            }
        }
        Some(item)
    }
}

impl<T: ComponentHandle + 'static> StorageAnchor for Weak<T> {
    fn storage_provider(&self) -> Option<Box<dyn StorageProvider>> {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            return None;
        }

        let ui = self.upgrade()?;
        let handle = ui.window().window_handle();
        if let Err(e) = HasWindowHandle::window_handle(&handle) {
            tracing::debug!("Window has no native handle, dialogs unavailable: {}", e);
            return None;
        }

        Some(Box::new(RfdStorageProvider::new(self.clone())))
    }
}

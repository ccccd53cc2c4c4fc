//! Application Error
//!
//! The single error currency at the HTTP boundary: [`AppError`], the
//! [`AppResult<T>`] alias, and lifting helpers for `Result`/`Option`.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// 未処理エラーの既定メッセージ
///
/// メッセージを持たない失敗はこの文言に正規化されます。
pub const UNHANDLED_MESSAGE: &str = "Something went wrong!";

/// アプリケーション統一エラー型
///
/// 各クレートの thiserror エラーは HTTP 境界でこの型へ合流します。
/// `kind` がステータスコードを決め、`message` がそのままユーザーへ届く
/// 文言になります。`source` は補足用で、レスポンスには含まれません。
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::AppError;
/// use kernel::error::kind::ErrorKind;
///
/// let plain = AppError::new(ErrorKind::Conflict, "Username already taken");
/// let guided = AppError::bad_request("Invalid price")
///     .with_action("Enter a non-negative amount");
/// ```
pub struct AppError {
    /// 失敗の分類。ステータスコードはここから決まります
    kind: ErrorKind,
    /// そのまま画面に出せる文言
    message: Cow<'static, str>,
    /// 利用者への次の一手（任意）
    action: Option<Cow<'static, str>>,
    /// 根本原因。レスポンスには出ません
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>` の別名
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::{AppError, AppResult};
///
/// fn listing_title(found: bool) -> AppResult<String> {
///     if !found {
///         return Err(AppError::not_found("Listing not found"));
///     }
///     Ok("Cabin by the lake".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

/// ステータス別のコンストラクタを生成するマクロ
macro_rules! kind_constructors {
    ($($(#[$doc:meta])* $name:ident => $kind:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $name(message: impl Into<Cow<'static, str>>) -> Self {
                Self::new(ErrorKind::$kind, message)
            }
        )+
    };
}

impl AppError {
    /// 種別とメッセージからエラーを作成
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    kind_constructors! {
        /// 400 Bad Request
        bad_request => BadRequest,
        /// 401 Unauthorized
        unauthorized => Unauthorized,
        /// 403 Forbidden
        forbidden => Forbidden,
        /// 404 Not Found
        not_found => NotFound,
        /// 409 Conflict
        conflict => Conflict,
        /// 422 Unprocessable Entity
        unprocessable => UnprocessableEntity,
        /// 500 Internal Server Error
        internal => InternalServerError,
        /// 503 Service Unavailable
        service_unavailable => ServiceUnavailable,
    }

    /// 正規化された未処理エラー（500 / 既定メッセージ）
    ///
    /// メッセージを伴わない失敗の終端表現です。
    #[inline]
    pub fn unhandled() -> Self {
        Self::internal(UNHANDLED_MESSAGE)
    }

    /// ユーザーが次に取るべきアクションを添える
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// 元のエラーを保持する（ログとデバッグ用）
    #[inline]
    pub fn with_source<E: Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// エラー種別を返す
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 対応する HTTP ステータスコードを返す
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// 画面に出す文言を返す
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 添えられたアクションを返す
    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// 5xx 系なら true
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    /// 4xx 系なら true
    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("AppError");
        out.field("kind", &self.kind).field("message", &self.message);
        if let Some(action) = &self.action {
            out.field("action", action);
        }
        if let Some(source) = &self.source {
            out.field("source", source);
        }
        out.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.status_code(), self.message)?;
        if let Some(action) = &self.action {
            write!(f, " - {action}")?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

// ============================================================================
// Response error context
// ============================================================================

/// レスポンス拡張として伝搬するエラー内容
///
/// `IntoResponse` が挿入し、エラーページ描画段が読み取ります。
/// `{statusCode, message}` の正規化された形そのものです。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// HTTP ステータスコード
    pub status_code: u16,
    /// ユーザー向けメッセージ
    pub message: String,
}

impl From<&AppError> for ErrorContext {
    fn from(err: &AppError) -> Self {
        Self {
            status_code: err.status_code(),
            message: err.message().to_string(),
        }
    }
}

// ============================================================================
// Result extension traits
// ============================================================================

/// 任意の `Result<T, E>` を `AppResult<T>` へ持ち上げる拡張
pub trait ResultExt<T, E: Error + Send + Sync + 'static> {
    /// エラーを指定した種別とメッセージの `AppError` に包む
    fn map_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>;
}

impl<T, E: Error + Send + Sync + 'static> ResultExt<T, E> for Result<T, E> {
    fn map_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T> {
        self.map_err(|e| AppError::new(kind, message).with_source(e))
    }
}

/// `Option<T>` を `AppResult<T>` へ持ち上げる拡張
pub trait OptionExt<T> {
    /// `None` を指定した種別の `AppError` にする
    fn ok_or_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>;

    /// `None` を 404 Not Found にする
    fn ok_or_not_found(self, message: impl Into<Cow<'static, str>>) -> AppResult<T>
    where
        Self: Sized,
    {
        self.ok_or_app_err(ErrorKind::NotFound, message)
    }
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T> {
        self.ok_or_else(|| AppError::new(kind, message))
    }
}

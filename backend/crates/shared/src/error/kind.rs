//! Error Kind - HTTP-facing error classification
//!
//! [`ErrorKind`] は `AppError` が HTTP ステータスへ落ちるときの分類です。

/// エラー分類
///
/// 各バリアントは RFC 9110 のステータスコードと理由フレーズに対応します。
/// `non_exhaustive` のため、利用側の match には常にワイルドカード腕が必要です。
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Forbidden.status_code(), 403);
/// assert_eq!(ErrorKind::Forbidden.as_str(), "Forbidden");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400: 入力が不正
    BadRequest,
    /// 401: 認証されていない
    Unauthorized,
    /// 403: 権限がない
    Forbidden,
    /// 404: リソースが存在しない
    NotFound,
    /// 409: 既存の状態と衝突
    Conflict,
    /// 422: 意味的に処理できない入力
    UnprocessableEntity,
    /// 500: サーバー内部の異常
    InternalServerError,
    /// 503: 一時的に提供不能
    ServiceUnavailable,
}

impl ErrorKind {
    /// ステータスコードと理由フレーズの対応表
    const fn parts(&self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Forbidden => (403, "Forbidden"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::UnprocessableEntity => (422, "Unprocessable Entity"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
            ErrorKind::ServiceUnavailable => (503, "Service Unavailable"),
        }
    }

    /// HTTP ステータスコード
    #[inline]
    pub const fn status_code(&self) -> u16 {
        self.parts().0
    }

    /// 標準的な理由フレーズ
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.parts().1
    }

    /// 5xx 系かどうか。ログへ残すべきエラーの判定に使います。
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 4xx 系かどうか
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

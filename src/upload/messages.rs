// User-facing texts shown by the dashboard's upload page.

pub const NETWORK_ERROR: &str = "ネットワークエラーが発生しました。";
pub const UPLOAD_FAILED: &str = "アップロードに失敗しました。";
pub const UPLOAD_COMPLETE: &str = "アップロードが完了しました。";
pub const MISSING_FILE: &str = "動画ファイルを選択してください。";
pub const UNSUPPORTED_FILE_TYPE: &str = "サポートされていないファイル形式です。";
pub const MISSING_PRIVACY: &str = "プライバシー設定を選択してください。";
pub const PRIVACY_RESTRICTION: &str =
    "未監査アプリケーションでは「自分だけ」の設定でのみ投稿可能です。";
pub const CONSENT_REQUIRED: &str = "TikTokの音楽使用確認に同意してください。";
pub const UPLOAD_IN_PROGRESS: &str = "アップロード処理中です。完了するまでお待ちください。";
pub const SERVER_CONNECTION_ERROR: &str =
    "サーバーに接続できません。サーバーが起動しているか確認してください。";
pub const CONTENT_POSTING_API_ERROR: &str =
    "Content Posting APIの権限が不足しています。アプリの設定でContent Posting APIを有効にしてください。";
pub const PRIVATE_ACCOUNT_REQUIRED: &str =
    "未監査クライアントはプライベートアカウントのみに投稿できます。TikTokアプリでアカウントをプライベート設定に変更してください。";
pub const SPAM_RISK_ERROR: &str = "投稿頻度が高すぎます。しばらく時間をおいてから再度お試しください。\n\n【対処法】\n• 数分間待ってから再度投稿してください\n• TikTokアプリで既存の下書きを確認・削除してください\n• 投稿間隔を空けてください";
pub const COOLDOWN_REASON: &str = "【理由】\n• TikTokのスパム対策により、短時間での連続投稿が制限されています\n• 投稿間隔を空けることで、エラーを回避できます";

pub const RESULT_TITLE_SUCCESS: &str = "アップロード完了";
pub const RESULT_TITLE_FAILURE: &str = "アップロード失敗";
pub const OPEN_PROFILE: &str = "プロフィールを開く";
pub const DRAFT_NOTICE: &str = "📱 下書き投稿について\n• 下書き投稿はPCやWebブラウザでは表示されない仕様です\n• スマホの「メッセージ」→「システム通知」から投稿を進めることができます";

/// Line prefix the backend uses for the account's profile URL.
pub const PROFILE_MARKER: &str = "プロフィール:";

pub fn cooldown(remaining_minutes: i64) -> String {
    format!(
        "投稿間隔が短すぎます。{}分後に再度お試しください。\n\n{}",
        remaining_minutes, COOLDOWN_REASON
    )
}

pub fn error_detail(detail: &str) -> String {
    format!("エラー詳細: {}", detail)
}

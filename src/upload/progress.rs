use super::request::TargetMode;

/// Advisory checkpoints reported while a submission is in flight.
/// They mark logical steps, not bytes transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    RequestSending,
    ServerProcessing,
    ConfirmingResult,
    Completed,
    Errored,
}

impl Checkpoint {
    pub fn percent(&self) -> u8 {
        match self {
            Self::RequestSending => 0,
            Self::ServerProcessing => 20,
            Self::ConfirmingResult => 60,
            Self::Completed | Self::Errored => 100,
        }
    }

    pub fn label(&self, mode: TargetMode) -> String {
        let suffix = match self {
            Self::RequestSending => "リクエスト送信中...",
            Self::ServerProcessing => "サーバー処理中...",
            Self::ConfirmingResult => "結果確認中...",
            Self::Completed => "完了",
            Self::Errored => "エラー",
        };
        format!("{}{}", mode.label(), suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_carry_mode_prefix() {
        assert_eq!(
            Checkpoint::RequestSending.label(TargetMode::Publish),
            "直接投稿リクエスト送信中..."
        );
        assert_eq!(Checkpoint::Errored.label(TargetMode::Draft), "下書き投稿エラー");
    }

    #[test]
    fn percents_increase_towards_completion() {
        let order = [
            Checkpoint::RequestSending,
            Checkpoint::ServerProcessing,
            Checkpoint::ConfirmingResult,
            Checkpoint::Completed,
        ];
        assert!(order.windows(2).all(|w| w[0].percent() < w[1].percent()));
        assert_eq!(Checkpoint::Errored.percent(), 100);
    }
}

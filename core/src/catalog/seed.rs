//! Default catalog contents

use crate::catalog::PluginRecord;
use serde_json::Map;

/// The catalog written the first time the backing document is missing.
///
/// Always returns the same records in the same order.
pub fn default_plugins() -> Vec<PluginRecord> {
    vec![
        plugin(
            "聊天记录分析插件",
            "分析群聊记录，生成统计报告和词云图，帮助了解群聊活跃度和话题趋势",
            "MaiBot Team",
            "https://github.com/maibot/chat-analytics-plugin",
            "1.0.0",
            &["分析", "统计"],
            &["聊天记录", "分析", "统计", "词云"],
            "2024-01-15T10:00:00Z",
            "2024-01-15T10:00:00Z",
        ),
        plugin(
            "音乐点播插件",
            "支持点播网易云音乐、QQ音乐等平台的音乐，可以分享音乐卡片到群聊",
            "Community",
            "https://github.com/maibot/music-plugin",
            "2.1.0",
            &["娱乐", "音乐"],
            &["音乐", "点播", "网易云", "QQ音乐"],
            "2024-01-10T15:30:00Z",
            "2024-02-01T09:15:00Z",
        ),
        plugin(
            "天气查询插件",
            "查询全国各地天气信息，支持实时天气、未来几天预报和空气质量查询",
            "WeatherBot",
            "https://github.com/maibot/weather-plugin",
            "1.5.2",
            &["实用工具", "查询"],
            &["天气", "预报", "空气质量", "查询"],
            "2024-01-05T08:00:00Z",
            "2024-01-25T14:20:00Z",
        ),
        plugin(
            "定时提醒插件",
            "设置定时提醒任务，支持一次性提醒和周期性提醒，可用于会议提醒、生日提醒等",
            "TimeKeeper",
            "https://github.com/maibot/reminder-plugin",
            "1.2.1",
            &["实用工具", "提醒"],
            &["定时", "提醒", "任务", "会议"],
            "2024-01-12T12:00:00Z",
            "2024-01-30T16:45:00Z",
        ),
        plugin(
            "表情包制作插件",
            "快速制作各种表情包，支持文字表情包、GIF表情包制作，内置多种模板",
            "MemeCreator",
            "https://github.com/maibot/meme-generator-plugin",
            "3.0.0",
            &["娱乐", "图片处理"],
            &["表情包", "制作", "GIF", "模板"],
            "2024-01-08T20:30:00Z",
            "2024-02-05T11:00:00Z",
        ),
        plugin(
            "群管理插件",
            "强化群管理功能，包括自动踢人、禁言管理、新人欢迎、群公告管理等",
            "AdminBot",
            "https://github.com/maibot/group-admin-plugin",
            "2.3.0",
            &["管理", "群聊"],
            &["群管理", "踢人", "禁言", "欢迎"],
            "2024-01-03T09:15:00Z",
            "2024-01-28T13:30:00Z",
        ),
        plugin(
            "翻译插件",
            "多语言翻译支持，使用多个翻译API，支持自动检测语言和批量翻译",
            "TranslateBot",
            "https://github.com/maibot/translate-plugin",
            "1.4.0",
            &["实用工具", "翻译"],
            &["翻译", "多语言", "自动检测", "批量"],
            "2024-01-18T14:20:00Z",
            "2024-02-02T10:10:00Z",
        ),
        plugin(
            "游戏插件",
            "群聊小游戏合集，包括猜数字、成语接龙、答题游戏等多种互动游戏",
            "GameMaster",
            "https://github.com/maibot/games-plugin",
            "2.0.1",
            &["娱乐", "游戏"],
            &["游戏", "猜数字", "成语接龙", "互动"],
            "2024-01-20T16:45:00Z",
            "2024-02-03T08:25:00Z",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn plugin(
    name: &str,
    description: &str,
    author: &str,
    repository_url: &str,
    version: &str,
    categories: &[&str],
    keywords: &[&str],
    created_at: &str,
    updated_at: &str,
) -> PluginRecord {
    PluginRecord {
        name: name.to_string(),
        description: description.to_string(),
        author: author.to_string(),
        repository_url: repository_url.to_string(),
        version: version.to_string(),
        categories: categories.iter().map(|s| s.to_string()).collect(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        created_at: created_at.to_string(),
        updated_at: updated_at.to_string(),
        extra: Map::new(),
    }
}

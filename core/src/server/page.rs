//! Landing page served at `/`

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Plugin Market API</title>
    <meta charset="utf-8">
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 800px;
            margin: 0 auto;
            padding: 40px 20px;
            background-color: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        h1 { color: #333; text-align: center; }
        .api-info {
            background: #f1f3f4;
            padding: 15px;
            border-radius: 6px;
            margin: 20px 0;
        }
        .endpoint {
            background: #e8f5e8;
            padding: 10px;
            border-radius: 4px;
            margin: 10px 0;
            font-family: monospace;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Plugin Market API</h1>
        <div class="api-info">
            <h3>Endpoints</h3>
            <div class="endpoint">GET /plugin_list - list every plugin</div>
            <div class="endpoint">GET /plugins/{name} - plugin details by exact name</div>
            <div class="endpoint">GET /health - liveness check</div>
        </div>
        <p>Read-only catalog of bot plugins, served from a JSON document on disk.</p>
    </div>
</body>
</html>
"#;

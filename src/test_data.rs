#[cfg(test)]
pub const EXPORT_DATA: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0"
	xmlns:excerpt="http://wordpress.org/export/1.2/excerpt/"
	xmlns:content="http://purl.org/rss/1.0/modules/content/"
	xmlns:dc="http://purl.org/dc/elements/1.1/"
	xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
	<title>Thiago Cafe</title>
	<link>https://blog.example.com</link>
	<wp:wxr_version>1.2</wp:wxr_version>
	<item>
		<title>Hello world</title>
		<link>https://blog.example.com/hello-world/</link>
		<pubDate>Tue, 01 Jan 2019 12:00:00 +0000</pubDate>
		<dc:creator><![CDATA[thiago]]></dc:creator>
		<content:encoded><![CDATA[
<p>Welcome to the blog.</p>

<img src="https://blog.example.com/wp-content/uploads/2019/01/b.jpg" />
]]></content:encoded>
		<excerpt:encoded><![CDATA[Just an excerpt]]></excerpt:encoded>
		<wp:post_id>5</wp:post_id>
		<wp:post_name><![CDATA[hello-world]]></wp:post_name>
		<wp:status><![CDATA[publish]]></wp:status>
		<wp:post_parent>0</wp:post_parent>
		<wp:post_type><![CDATA[post]]></wp:post_type>
		<wp:postmeta>
			<wp:meta_key><![CDATA[_edit_last]]></wp:meta_key>
			<wp:meta_value><![CDATA[1]]></wp:meta_value>
		</wp:postmeta>
		<wp:postmeta>
			<wp:meta_key><![CDATA[_thumbnail_id]]></wp:meta_key>
			<wp:meta_value><![CDATA[11]]></wp:meta_value>
		</wp:postmeta>
	</item>
	<item>
		<title>a</title>
		<pubDate>Tue, 01 Jan 2019 11:00:00 +0000</pubDate>
		<wp:post_id>10</wp:post_id>
		<wp:post_parent>5</wp:post_parent>
		<wp:post_type><![CDATA[attachment]]></wp:post_type>
		<wp:attachment_url><![CDATA[https://blog.example.com/wp-content/uploads/2019/01/a.png]]></wp:attachment_url>
	</item>
	<item>
		<title>b</title>
		<pubDate>Tue, 01 Jan 2019 11:05:00 +0000</pubDate>
		<wp:post_id>11</wp:post_id>
		<wp:post_parent>5</wp:post_parent>
		<wp:post_type><![CDATA[attachment]]></wp:post_type>
		<wp:attachment_url><![CDATA[https://blog.example.com/wp-content/uploads/2019/01/b.JPG]]></wp:attachment_url>
	</item>
	<item>
		<title>manual</title>
		<pubDate>Tue, 01 Jan 2019 11:06:00 +0000</pubDate>
		<wp:post_id>12</wp:post_id>
		<wp:post_parent>5</wp:post_parent>
		<wp:post_type><![CDATA[attachment]]></wp:post_type>
		<wp:attachment_url><![CDATA[https://blog.example.com/wp-content/uploads/2019/01/manual.pdf]]></wp:attachment_url>
	</item>
	<item>
		<title>Orphan</title>
		<pubDate>Tue, 01 Jan 2019 11:07:00 +0000</pubDate>
		<wp:post_id>13</wp:post_id>
		<wp:post_parent>99</wp:post_parent>
		<wp:post_type><![CDATA[attachment]]></wp:post_type>
		<wp:attachment_url><![CDATA[https://blog.example.com/wp-content/uploads/2018/12/orphan.gif]]></wp:attachment_url>
	</item>
	<item>
		<title>About "me"</title>
		<pubDate>Wed, 20 Apr 2022 16:00:00 +0200</pubDate>
		<content:encoded><![CDATA[  I write code.  ]]></content:encoded>
		<excerpt:encoded><![CDATA[]]></excerpt:encoded>
		<wp:post_id>20</wp:post_id>
		<wp:post_name><![CDATA[about]]></wp:post_name>
		<wp:post_type><![CDATA[post]]></wp:post_type>
	</item>
	<item>
		<title>Contact</title>
		<pubDate>Wed, 20 Apr 2022 16:00:00 +0000</pubDate>
		<content:encoded><![CDATA[Contact page]]></content:encoded>
		<wp:post_id>30</wp:post_id>
		<wp:post_name><![CDATA[contact]]></wp:post_name>
		<wp:post_type><![CDATA[page]]></wp:post_type>
	</item>
</channel>
</rss>
"#;

#[cfg(test)]
pub const EMPTY_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0" xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
	<title>Nothing here</title>
</channel>
</rss>
"#;

#[cfg(test)]
pub const SINGLE_POST_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/" xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
	<item>
		<title>Hello world</title>
		<pubDate>Tue, 01 Jan 2019 12:00:00 +0000</pubDate>
		<content:encoded><![CDATA[Welcome!]]></content:encoded>
		<wp:post_id>1</wp:post_id>
		<wp:post_name>hello-world</wp:post_name>
		<wp:post_type>post</wp:post_type>
	</item>
</channel>
</rss>
"#;

/// Export with one post whose cover image is served from `{{BASE_URL}}`
#[cfg(test)]
pub const COVER_EXPORT_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/" xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
	<item>
		<title>With cover</title>
		<pubDate>Tue, 01 Jan 2019 12:00:00 +0000</pubDate>
		<content:encoded><![CDATA[Look at this]]></content:encoded>
		<wp:post_id>7</wp:post_id>
		<wp:post_name>with-cover</wp:post_name>
		<wp:post_type>post</wp:post_type>
		<wp:postmeta>
			<wp:meta_key>_thumbnail_id</wp:meta_key>
			<wp:meta_value>8</wp:meta_value>
		</wp:postmeta>
	</item>
	<item>
		<title>cover</title>
		<wp:post_id>8</wp:post_id>
		<wp:post_parent>7</wp:post_parent>
		<wp:post_type>attachment</wp:post_type>
		<wp:attachment_url>{{BASE_URL}}/uploads/cover.png</wp:attachment_url>
	</item>
</channel>
</rss>
"#;

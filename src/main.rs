use desk_scene::config::SceneConfig;

fn main() -> anyhow::Result<()> {
    desk_scene::flow::run(SceneConfig::from_env())
}

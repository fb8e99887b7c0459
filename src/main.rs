//! DistScene 演示程序
//!
//! 组装一棵小场景树，初始化后按固定步长运行若干帧，最后演示组件和子树的移除。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --frames 10 --fps 30 --log-level debug
//! ```

use anyhow::Context as _;
use tracing::{debug, info};

use dist_scene::component::{Component, ComponentState, GameObject, Transform};
use dist_scene::core::{log, Config, Context, Vector3};
use dist_scene::{app_info, span_trace};

/// 每帧绕 Y 轴旋转的演示组件
struct Spinner {
    state: ComponentState,
    degrees_per_second: f32,
    angle: f32,
}

impl Spinner {
    fn new(degrees_per_second: f32) -> Self {
        Self {
            state: ComponentState::new(),
            degrees_per_second,
            angle: 0.0,
        }
    }
}

impl Component for Spinner {
    fn name(&self) -> &str {
        "Spinner"
    }

    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn on_initialize(&mut self) {
        debug!(speed = self.degrees_per_second, "Spinner initialized");
    }

    fn update(&mut self, context: &Context) {
        self.angle = (self.angle + self.degrees_per_second * context.delta_time) % 360.0;
    }

    fn draw(&self) {
        debug!(angle = self.angle, "Spinner drawn");
    }
}

fn build_scene(config: &Config) -> GameObject {
    let mut root = GameObject::new(config.scene.root_name.as_str());

    let mut player = GameObject::new("Player");
    if let Some(transform) = player.transform_mut() {
        transform.set_position(Vector3::new(0.0, 1.0, 0.0));
    }
    player.add_component(Spinner::new(90.0));

    let mut weapon = GameObject::new("Weapon");
    weapon.add_component(Transform::with_position(
        "Muzzle",
        Vector3::new(0.0, 0.0, -0.5),
    ));
    player.add_child(weapon);

    root.add_child(player);
    root.add_child(GameObject::new("Ground"));
    root
}

fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());

    // 3. 验证配置
    config.validate().context("invalid configuration")?;

    // 4. 初始化日志系统，守卫在 main 结束时释放
    let log_file = config
        .logging
        .file_output
        .then_some(config.logging.log_file.as_str());
    let _log_guard = log::init_logger(config.logging.level, config.logging.file_output, log_file)
        .context("failed to initialize logging")?;

    info!(version = env!("CARGO_PKG_VERSION"), "DistScene starting...");

    // 5. 组装并初始化场景
    let mut root = build_scene(&config);
    root.initialize();
    app_info!(
        root = root.name(),
        objects = root.descendant_count() + 1,
        "Scene initialized"
    );

    // 6. 帧循环
    let delta_time = config.simulation.delta_time();
    let mut context = Context::new(delta_time);
    for _ in 0..config.simulation.frames {
        let span = span_trace!("frame", index = context.frame);
        let _enter = span.enter();

        root.update(&context);
        root.draw();
        debug!("{}", context);

        context = context.next(delta_time);
    }

    // 7. 结构变化：已初始化的树会立即初始化新挂载的对象
    let mut late = GameObject::new("LateArrival");
    late.add_component(Spinner::new(45.0));
    let late_id = root.add_child(late);

    let ground_id = root
        .find_descendant("Ground")
        .map(|ground| ground.id())
        .context("ground object missing")?;
    root.remove_child(ground_id)?;

    if let Some(player) = root.find_descendant_mut("Player") {
        let spinner_id = player
            .get_component::<Spinner>()
            .map(|spinner| spinner.id())
            .context("spinner missing")?;
        player.remove_component(spinner_id)?;
    }

    app_info!(
        late_initialized = root.child(late_id).is_some_and(|o| o.is_initialized()),
        objects = root.descendant_count() + 1,
        "Scene finished"
    );

    Ok(())
}

use project_board_ui::init_project;

fn main() {
    console_error_panic_hook::set_once();
    init_project();
}

use crate::api::{Gateway, HttpGateway, TaskDraft};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::config;
use crate::model::Status;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    let base_url = match cli.api_url {
        Some(url) => url,
        None => config::load_config()?.api.base_url,
    };
    let gateway = HttpGateway::new(base_url);

    match cli.command {
        None => unreachable!("no subcommand launches the TUI in main"),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(&gateway, args, json),
            Commands::Projects => cmd_projects(&gateway, json),
            Commands::Add(args) => cmd_add(&gateway, args, json),
            Commands::Toggle(args) => cmd_toggle(&gateway, args, json),
            Commands::Mv(args) => cmd_mv(&gateway, args, json),
            Commands::Rm(args) => cmd_rm(&gateway, args),
            Commands::Sub(args) => cmd_sub(&gateway, args.command, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

fn cmd_list(
    gateway: &dyn Gateway,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = args.status.as_deref().map(str::parse::<Status>).transpose()?;
    let tasks = gateway.list_tasks()?;
    let tasks: Vec<_> = tasks
        .into_iter()
        .filter(|t| filter.is_none_or(|s| t.status == s))
        .collect();

    if json {
        let out: Vec<_> = tasks.iter().map(task_to_json).collect();
        print_json(&out)?;
    } else {
        for task in &tasks {
            print_task_line(task);
        }
    }
    Ok(())
}

fn cmd_projects(gateway: &dyn Gateway, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let projects = gateway.list_projects()?;
    if json {
        let out: Vec<_> = projects.iter().map(project_to_json).collect();
        print_json(&out)?;
    } else {
        for project in &projects {
            print_project_line(project);
        }
    }
    Ok(())
}

fn cmd_add(
    gateway: &dyn Gateway,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err("task name cannot be empty".into());
    }
    let draft = TaskDraft {
        name: name.to_string(),
        description: args.description,
        project_id: args.project,
    };
    let task = gateway.create_task(&draft)?;
    if json {
        print_json(&task_to_json(&task))?;
    } else {
        print_task_line(&task);
    }
    Ok(())
}

fn cmd_toggle(
    gateway: &dyn Gateway,
    args: IdArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let task = gateway.toggle_task(args.id)?;
    if json {
        print_json(&task_to_json(&task))?;
    } else {
        print_task_line(&task);
    }
    Ok(())
}

fn cmd_mv(
    gateway: &dyn Gateway,
    args: MvArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let status: Status = args.status.parse()?;
    let task = gateway.change_status(args.id, status)?;
    if json {
        print_json(&task_to_json(&task))?;
    } else {
        print_task_line(&task);
    }
    Ok(())
}

fn cmd_rm(gateway: &dyn Gateway, args: IdArgs) -> Result<(), Box<dyn std::error::Error>> {
    gateway.delete_task(args.id)?;
    println!("deleted #{}", args.id);
    Ok(())
}

// ---------------------------------------------------------------------------
// Subtask commands
// ---------------------------------------------------------------------------

fn cmd_sub(
    gateway: &dyn Gateway,
    command: SubCommands,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        SubCommands::List { task_id } => {
            let subtasks = gateway.list_subtasks(task_id)?;
            if json {
                let out: Vec<_> = subtasks.iter().map(subtask_to_json).collect();
                print_json(&out)?;
            } else {
                for sub in &subtasks {
                    print_subtask_line(sub);
                }
            }
        }
        SubCommands::Add { task_id, name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err("subtask name cannot be empty".into());
            }
            let sub = gateway.add_subtask(task_id, name)?;
            if json {
                print_json(&subtask_to_json(&sub))?;
            } else {
                print_subtask_line(&sub);
            }
        }
        SubCommands::Toggle {
            task_id,
            subtask_id,
        } => {
            gateway.toggle_subtask(task_id, subtask_id)?;
            // The toggle may have cascaded the parent; show the fresh state
            let tasks = gateway.list_tasks()?;
            match tasks.iter().find(|t| t.id == task_id) {
                Some(task) if json => print_json(&task_to_json(task))?,
                Some(task) => print_task_detail(task),
                None => println!("toggled subtask #{subtask_id}"),
            }
        }
        SubCommands::Rm {
            task_id,
            subtask_id,
        } => {
            gateway.delete_subtask(task_id, subtask_id)?;
            println!("deleted subtask #{subtask_id}");
        }
    }
    Ok(())
}
